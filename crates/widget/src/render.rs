//! Dropdown rendering.
//!
//! Rendering only touches the page and is idempotent: rows are cleared
//! before being re-emitted, so rendering the same items twice leaves the page
//! exactly as rendering them once.

use carrito_core::{CartItem, Price};

use crate::page::{CartRow, Page};

/// Render `items` into the dropdown.
///
/// No-op when the page has no dropdown container.
pub fn render<P: Page + ?Sized>(page: &mut P, items: &[CartItem]) {
    if !page.has_dropdown() {
        return;
    }

    page.clear_rows();

    if items.is_empty() {
        page.set_empty_message_visible(true);
        page.set_total(&Price::ZERO.display());
        set_indicator(page, false);
        return;
    }

    page.set_empty_message_visible(false);

    for item in items {
        page.append_row(CartRow::from(item));
    }

    let total: Price = items.iter().map(CartItem::line_total).sum();
    page.set_total(&total.display());
}

/// Turn the badge on iff the cart has items.
///
/// Counts distinct lines, not summed quantity.
pub fn update_indicator<P: Page + ?Sized>(page: &mut P, items: &[CartItem]) {
    set_indicator(page, !items.is_empty());
}

/// Reset the dropdown to the empty state without touching cart data.
///
/// Works on pages without the container too, so logout can hide a stray
/// badge.
pub fn clear<P: Page + ?Sized>(page: &mut P) {
    page.clear_rows();
    page.set_empty_message_visible(true);
    page.set_total(&Price::ZERO.display());
    set_indicator(page, false);
}

fn set_indicator<P: Page + ?Sized>(page: &mut P, active: bool) {
    if let Some(indicator) = page.indicator() {
        indicator.set_active(active);
    }
}
