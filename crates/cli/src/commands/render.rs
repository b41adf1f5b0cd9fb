//! Render the full widget page.

use std::path::Path;

use fakestore_cart_widget::{CartWidget, WidgetConfig};

use super::{CommandError, emit};

/// Render products, cart and summary into one HTML document.
pub async fn page(config: &WidgetConfig, out: Option<&Path>) -> Result<(), CommandError> {
    let widget = CartWidget::from_config(config);
    let frame = widget.refresh().await?;
    let html = frame.to_page()?;

    match out {
        Some(path) => {
            std::fs::write(path, html)?;
            tracing::info!(path = %path.display(), "Wrote cart page");
        }
        None => emit(&html),
    }
    Ok(())
}
