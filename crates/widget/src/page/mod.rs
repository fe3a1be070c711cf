//! The page the dropdown lives in.
//!
//! [`Page`] is the DOM contract the renderer depends on. Every element is
//! optional: a page without the dropdown container simply does not show the
//! widget, and a missing list, total or badge is skipped.
//!
//! Delete buttons are wired by capture: each rendered [`CartRow`] carries a
//! [`DeleteAction`] holding its item's id, which the host hands back to
//! [`crate::CartWidget::handle`] when the button is pressed.

mod headless;
mod indicator;

use carrito_core::{CartItem, ItemId};

pub use headless::DropdownPage;
pub use indicator::{Badge, BadgeVariant, Display, NotificationIndicator};

/// Element ids of the dropdown markup.
pub mod element_ids {
    /// Dropdown container; its absence disables the widget on the page.
    pub const CONTAINER: &str = "cart-items-container";
    /// List root holding one row per item.
    pub const LIST: &str = "cart-products";
    /// "Cart is empty" message.
    pub const EMPTY_MESSAGE: &str = "empty-cart-message";
    /// Cart total.
    pub const TOTAL: &str = "cart-total";
    /// Badge toggled through its `active` class.
    pub const CLASS_BADGE: &str = "cart-notification-badge";
    /// Badge toggled through its `display` style.
    pub const DISPLAY_BADGE: &str = "cart-indicator";
}

/// Text of the empty-cart message.
pub const EMPTY_MESSAGE_TEXT: &str = "El carrito está vacío.";

/// Delete handler bound to one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeleteAction {
    id: ItemId,
}

impl DeleteAction {
    /// Bind a delete to `id`.
    #[must_use]
    pub const fn new(id: ItemId) -> Self {
        Self { id }
    }

    /// Id of the item this action deletes.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }
}

/// One rendered dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub image: String,
    pub name: String,
    pub quantity: u32,
    /// Formatted `price × quantity`.
    pub price: String,
    /// `None` when the item has no backend id and cannot be removed.
    pub delete: Option<DeleteAction>,
}

impl From<&CartItem> for CartRow {
    fn from(item: &CartItem) -> Self {
        Self {
            image: item.display_image().to_owned(),
            name: item.display_name().to_owned(),
            quantity: item.quantity,
            price: item.line_total().display(),
            delete: item
                .id
                .as_ref()
                .filter(|id| !id.is_empty())
                .cloned()
                .map(DeleteAction::new),
        }
    }
}

/// DOM operations the widget needs from its host page.
pub trait Page {
    /// Whether the dropdown container is present.
    fn has_dropdown(&self) -> bool;

    /// Remove every rendered row.
    fn clear_rows(&mut self);

    /// Append a row to the list.
    fn append_row(&mut self, row: CartRow);

    /// Show or hide the empty-cart message.
    fn set_empty_message_visible(&mut self, visible: bool);

    /// Replace the total text.
    fn set_total(&mut self, text: &str);

    /// The notification badge, whichever variant the page has.
    fn indicator(&mut self) -> Option<&mut dyn NotificationIndicator>;

    /// Show a blocking notice to the user.
    fn alert(&mut self, message: &str);
}
