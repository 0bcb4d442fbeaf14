//! Scoped hide/show around a capture.

/// Calls `hide` on creation and `show` when dropped.
///
/// `show` runs exactly once on every exit path, including `?` returns and
/// panics that unwind through the guard.
pub struct VisibilityGuard<S: FnOnce()> {
    show: Option<S>,
}

impl<S: FnOnce()> VisibilityGuard<S> {
    pub fn hide<H: FnOnce()>(hide: H, show: S) -> Self {
        log::info!("[CAPTURE] Hiding main window before capture");
        hide();
        Self { show: Some(show) }
    }
}

impl<S: FnOnce()> Drop for VisibilityGuard<S> {
    fn drop(&mut self) {
        if let Some(show) = self.show.take() {
            log::info!("[CAPTURE] Showing main window after capture");
            show();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn hide_then_show_on_drop() {
        let hidden = Cell::new(0);
        let shown = Cell::new(0);
        {
            let _guard = VisibilityGuard::hide(|| hidden.set(hidden.get() + 1), || shown.set(shown.get() + 1));
            assert_eq!(hidden.get(), 1);
            assert_eq!(shown.get(), 0);
        }
        assert_eq!(shown.get(), 1);
    }

    #[test]
    fn show_runs_on_early_return() {
        let shown = Cell::new(0);
        let attempt = || -> Result<(), &'static str> {
            let _guard = VisibilityGuard::hide(|| {}, || shown.set(shown.get() + 1));
            Err::<(), _>("capture failed")?;
            Ok(())
        };
        assert!(attempt().is_err());
        assert_eq!(shown.get(), 1);
    }
}
