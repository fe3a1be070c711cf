//! Cart commands.
//!
//! Every command first runs the page-load sequence so the dropdown (and the
//! duplicate check) reflects the backend, then performs its action.

use std::path::Path;

use carrito_core::{CartItem, ItemId, Price};
use carrito_widget::{AddOutcome, RemoveOutcome, WidgetConfig};

use super::{CliWidget, open_widget};
use crate::output;

/// What `remove` should delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// A backend id.
    Id(String),
    /// The delete button of a dropdown row.
    Row(usize),
}

/// Load the cart and print the dropdown.
///
/// # Errors
///
/// Returns an error if the widget cannot be opened or output fails.
pub async fn show(
    config: &WidgetConfig,
    store_path: &Path,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = open_widget(config, store_path)?;
    widget.init().await;

    if html {
        output::html(widget.page())?;
    } else {
        output::dropdown(widget.page(), widget.state())?;
    }
    Ok(())
}

/// Add a product.
///
/// # Errors
///
/// Returns an error if the widget cannot be opened or the add did not happen.
pub async fn add(
    config: &WidgetConfig,
    store_path: &Path,
    name: String,
    price: u64,
    image: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = open_widget(config, store_path)?;
    widget.init().await;

    let mut item = CartItem::new(name, Price::new(price));
    if let Some(image) = image {
        item = item.with_image(image);
    }

    let outcome = widget.add_item(item).await;
    finish(&mut widget)?;

    match outcome {
        AddOutcome::Added(saved) => {
            tracing::info!(id = ?saved.id, "Added {}", saved.name);
            Ok(())
        }
        AddOutcome::Duplicate => Err("item already in cart".into()),
        AddOutcome::Failed => Err("add failed".into()),
    }
}

/// Remove an item by id or by dropdown row.
///
/// # Errors
///
/// Returns an error if the widget cannot be opened, the row has no delete
/// button, or the remove did not happen.
pub async fn remove(
    config: &WidgetConfig,
    store_path: &Path,
    target: RemoveTarget,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = open_widget(config, store_path)?;
    widget.init().await;

    let outcome = match target {
        RemoveTarget::Id(id) => widget.remove_item(&ItemId::new(id)).await,
        RemoveTarget::Row(row) => {
            let Some(action) = widget.page().click_delete(row) else {
                return Err(format!("row {row} has no delete button").into());
            };
            widget.handle(action).await
        }
    };
    finish(&mut widget)?;

    match outcome {
        RemoveOutcome::Removed => Ok(()),
        RemoveOutcome::Failed => Err("remove failed".into()),
    }
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the widget cannot be opened or the clear did not happen.
pub async fn clear(config: &WidgetConfig, store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = open_widget(config, store_path)?;
    widget.init().await;

    let cleared = widget.clear_cart().await;
    finish(&mut widget)?;

    if cleared {
        Ok(())
    } else {
        Err("clear failed".into())
    }
}

/// Print alerts raised during the command, then the resulting dropdown.
fn finish(widget: &mut CliWidget) -> Result<(), Box<dyn std::error::Error>> {
    let alerts = widget.page_mut().take_alerts();
    output::alerts(&alerts)?;
    output::dropdown(widget.page(), widget.state())?;
    Ok(())
}
