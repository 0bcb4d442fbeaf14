//! Preview encoding — functional core.
//!
//! Bytes in, data URI out. No file system access here.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Prefix of every preview string.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encodes raw image bytes as a `data:image/png;base64,...` URI.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(bytes, &mut uri);
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_png_prefix() {
        let uri = encode_data_uri(&[0x89, 0x50, 0x4E, 0x47]);
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn suffix_decodes_to_input() {
        let bytes: Vec<u8> = (0..=255).collect();
        let uri = encode_data_uri(&bytes);
        let decoded = STANDARD
            .decode(&uri[PNG_DATA_URI_PREFIX.len()..])
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn empty_input_is_just_the_prefix() {
        assert_eq!(encode_data_uri(&[]), PNG_DATA_URI_PREFIX);
    }
}
