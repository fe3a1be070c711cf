//! Terminal rendering of the dropdown.

use std::io::{self, Write};

use carrito_widget::html::render_html;
use carrito_widget::{CartState, DropdownPage};

/// Print one line to stdout.
pub fn line(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")
}

/// Print notices raised by the page.
pub fn alerts(alerts: &[String]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for alert in alerts {
        writeln!(out, "! {alert}")?;
    }
    Ok(())
}

/// Print the dropdown as text.
pub fn dropdown(page: &DropdownPage, state: &CartState) -> io::Result<()> {
    let mut out = io::stdout().lock();

    if page.empty_message_visible() {
        writeln!(out, "{}", carrito_widget::page::EMPTY_MESSAGE_TEXT)?;
    }

    for (index, row) in page.rows().iter().enumerate() {
        let id = row
            .delete
            .as_ref()
            .map_or_else(|| "-".to_owned(), |action| action.id().to_string());
        if row.quantity > 1 {
            writeln!(out, "[{index}] {} x{}  {}  ({id})", row.name, row.quantity, row.price)?;
        } else {
            writeln!(out, "[{index}] {}  {}  ({id})", row.name, row.price)?;
        }
    }

    writeln!(out, "Total: {}", page.total().unwrap_or("$0"))?;
    writeln!(
        out,
        "Items: {} ({} units){}",
        state.item_count(),
        state.total_quantity(),
        if page.badge_active() { "  [badge on]" } else { "" }
    )?;
    Ok(())
}

/// Print the dropdown's HTML fragment.
pub fn html(page: &DropdownPage) -> Result<(), Box<dyn std::error::Error>> {
    let fragment = render_html(page)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{fragment}")?;
    Ok(())
}
