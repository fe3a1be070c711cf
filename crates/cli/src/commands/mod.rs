//! CLI command implementations.

pub mod cart;
pub mod session;

use std::path::Path;

use carrito_widget::{CartClient, CartWidget, DropdownPage, FileStore, WidgetConfig};

/// The widget the CLI drives: file-backed storage, headless page.
pub type CliWidget = CartWidget<FileStore, DropdownPage>;

/// Open page storage at `store_path` and bind a widget to a full dropdown page.
///
/// # Errors
///
/// Returns an error if the storage file is unreadable or the HTTP client
/// cannot be built.
pub fn open_widget(config: &WidgetConfig, store_path: &Path) -> Result<CliWidget, Box<dyn std::error::Error>> {
    let store = FileStore::open(store_path)?;
    let client = CartClient::new(config)?;
    tracing::debug!(store = %store_path.display(), api = %client.base_url(), "Widget opened");
    Ok(CartWidget::new(client, store, DropdownPage::standard(), config))
}
