//! Cart state and its storage mirror.

use carrito_core::{CartItem, ItemId, Price};

use crate::storage::{KeyValueStore, keys};

/// The in-memory cart for the lifetime of a page.
///
/// Owned by [`crate::CartWidget`]; the renderer only ever sees a slice of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Replace the whole cart (after a fetch).
    pub fn replace(&mut self, items: Vec<CartItem>) {
        self.items = items;
    }

    /// Append an item (after an add).
    pub fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Drop every line with `id`, returning whether any was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_ref() != Some(id));
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether an item with exactly this name is already in the cart.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Number of distinct lines. This is what the badge counts.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ price × quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The cart mirror in page storage.
///
/// Fallback-only: it is read when the backend cannot be reached and is
/// overwritten by every successful fetch.
pub struct Mirror;

impl Mirror {
    /// Write `items` to the mirror.
    pub fn write<S: KeyValueStore + ?Sized>(store: &mut S, items: &[CartItem]) {
        match serde_json::to_string(items) {
            Ok(json) => store.set(keys::CART_MIRROR, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize cart mirror"),
        }
    }

    /// Read the mirror. Missing or unreadable mirrors are `None`.
    pub fn read<S: KeyValueStore + ?Sized>(store: &S) -> Option<Vec<CartItem>> {
        let raw = store.get(keys::CART_MIRROR)?;
        match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed cart mirror");
                None
            }
        }
    }

    /// Delete the mirror.
    pub fn remove<S: KeyValueStore + ?Sized>(store: &mut S) {
        store.remove(keys::CART_MIRROR);
    }
}
