//! Subcommand implementations.

pub mod cart;
pub mod render;

use fakestore_cart_widget::{ConfigError, StorageError, WidgetError};
use thiserror::Error;

/// Errors that can occur running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Widget(#[from] WidgetError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
fn emit(text: &str) {
    print!("{text}");
}
