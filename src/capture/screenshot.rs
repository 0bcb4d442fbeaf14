//! Full-screen capture using the `xcap` crate.
//!
//! This is the infrastructure layer — it talks to the OS. Only compiled
//! with `--features screen-capture`.

use super::CaptureProvider;
use crate::error::CaptureError;
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use xcap::Monitor;

/// Captures the primary monitor and returns PNG bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorProvider;

#[async_trait]
impl CaptureProvider for MonitorProvider {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        // xcap and PNG encoding are blocking
        tokio::task::spawn_blocking(capture_primary_monitor_png)
            .await
            .map_err(|e| CaptureError::Provider(format!("Capture task failed: {}", e)))?
    }
}

fn capture_primary_monitor_png() -> Result<Vec<u8>, CaptureError> {
    let start = std::time::Instant::now();

    let monitors = Monitor::all()
        .map_err(|e| CaptureError::Provider(format!("Failed to enumerate monitors: {}", e)))?;

    let primary = monitors
        .into_iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| {
            // Fallback: if no monitor reports as primary, use the first one
            Monitor::all().ok()?.into_iter().next()
        })
        .ok_or_else(|| CaptureError::Provider("No primary monitor found".to_string()))?;

    let image = primary
        .capture_image()
        .map_err(|e| CaptureError::Provider(format!("Screen capture failed: {}", e)))?;

    let mut png_bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::Provider(format!("PNG encoding failed: {}", e)))?;

    log::info!(
        "[CAPTURE] Primary monitor captured in {}ms ({} bytes)",
        start.elapsed().as_millis(),
        png_bytes.len()
    );

    Ok(png_bytes)
}
