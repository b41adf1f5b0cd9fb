//! Widget-level error type.
//!
//! Catalog and storage failures are absorbed by the widget (logged and
//! degraded), so the only error a caller of [`crate::CartWidget`] sees is a
//! template that failed to render.

use thiserror::Error;

/// Error surfaced by the render controller.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_error_display() {
        let err = WidgetError::from(askama::Error::Custom(Box::new(std::fmt::Error)));
        assert!(err.to_string().starts_with("Render error: "));
    }
}
