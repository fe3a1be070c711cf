//! HTML fragment of a rendered dropdown.
//!
//! For hosts that inject markup instead of driving a live DOM. Row delete
//! buttons carry only their row index (`data-row`); the host maps a press
//! back to [`DropdownPage::click_delete`] to get the captured action.

use askama::Template;

use crate::page::{Badge, CartRow, DropdownPage, EMPTY_MESSAGE_TEXT, NotificationIndicator, Page};

/// Badge display data for templates.
struct BadgeView {
    class_toggle: bool,
    active: bool,
    display: &'static str,
}

impl From<&Badge> for BadgeView {
    fn from(badge: &Badge) -> Self {
        match badge {
            Badge::ClassToggle { active_class } => Self {
                class_toggle: true,
                active: *active_class,
                display: "",
            },
            Badge::DisplayToggle { display } => Self {
                class_toggle: false,
                active: badge.is_active(),
                display: display.as_css(),
            },
        }
    }
}

/// Dropdown fragment template.
#[derive(Template)]
#[template(path = "dropdown.html")]
struct DropdownTemplate<'a> {
    rows: &'a [CartRow],
    empty_visible: bool,
    empty_message_text: &'a str,
    total: &'a str,
    badge: Option<BadgeView>,
}

/// Render the page's current dropdown state as HTML.
///
/// Pages without the dropdown container produce an empty string.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_html(page: &DropdownPage) -> askama::Result<String> {
    if !page.has_dropdown() {
        return Ok(String::new());
    }

    DropdownTemplate {
        rows: page.rows(),
        empty_visible: page.empty_message_visible(),
        empty_message_text: EMPTY_MESSAGE_TEXT,
        total: page.total().unwrap_or_default(),
        badge: page.badge().map(BadgeView::from),
    }
    .render()
}
