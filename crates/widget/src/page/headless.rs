//! In-memory page.
//!
//! Models exactly the elements of the dropdown markup and nothing else.
//! Used by the CLI to render the dropdown and by tests to observe what the
//! widget did.

use super::{
    Badge, BadgeVariant, CartRow, DeleteAction, NotificationIndicator, Page, element_ids,
};

/// Headless dropdown page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropdownPage {
    container: bool,
    /// `None` when the list root is absent.
    rows: Option<Vec<CartRow>>,
    /// `None` when the message element is absent, else its visibility.
    empty_message: Option<bool>,
    total: Option<String>,
    badge: Option<Badge>,
    alerts: Vec<String>,
}

impl DropdownPage {
    /// A page carrying the full dropdown markup with the class-toggle badge.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_elements([
            element_ids::CONTAINER,
            element_ids::LIST,
            element_ids::EMPTY_MESSAGE,
            element_ids::TOTAL,
            element_ids::CLASS_BADGE,
        ])
    }

    /// A page exposing only the given element ids, in their initial state.
    ///
    /// Unknown ids are ignored. The badge variant is detected from the ids.
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: Vec<&str> = ids.into_iter().collect();
        let has = |id: &str| ids.contains(&id);

        Self {
            container: has(element_ids::CONTAINER),
            rows: has(element_ids::LIST).then(Vec::new),
            empty_message: has(element_ids::EMPTY_MESSAGE).then_some(true),
            total: has(element_ids::TOTAL).then(String::new),
            badge: BadgeVariant::detect(ids.iter().copied()).map(Badge::inactive),
            alerts: Vec::new(),
        }
    }

    /// Rendered rows; empty when the list root is absent.
    #[must_use]
    pub fn rows(&self) -> &[CartRow] {
        self.rows.as_deref().unwrap_or_default()
    }

    /// Whether the empty-cart message is visible.
    #[must_use]
    pub fn empty_message_visible(&self) -> bool {
        self.empty_message.unwrap_or(false)
    }

    /// Total text, if the page has a total element.
    #[must_use]
    pub fn total(&self) -> Option<&str> {
        self.total.as_deref()
    }

    /// Badge state, if the page has a badge.
    #[must_use]
    pub const fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    /// Whether the badge is showing.
    #[must_use]
    pub fn badge_active(&self) -> bool {
        self.badge.as_ref().is_some_and(Badge::is_active)
    }

    /// Alerts shown so far.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain the alerts shown so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Press the delete button of row `index`.
    ///
    /// Returns the bound action, or `None` if the row does not exist or has
    /// no delete button.
    #[must_use]
    pub fn click_delete(&self, index: usize) -> Option<DeleteAction> {
        self.rows().get(index).and_then(|row| row.delete.clone())
    }
}

impl Page for DropdownPage {
    fn has_dropdown(&self) -> bool {
        self.container
    }

    fn clear_rows(&mut self) {
        if let Some(rows) = self.rows.as_mut() {
            rows.clear();
        }
    }

    fn append_row(&mut self, row: CartRow) {
        if let Some(rows) = self.rows.as_mut() {
            rows.push(row);
        }
    }

    fn set_empty_message_visible(&mut self, visible: bool) {
        if let Some(shown) = self.empty_message.as_mut() {
            *shown = visible;
        }
    }

    fn set_total(&mut self, text: &str) {
        if let Some(total) = self.total.as_mut() {
            text.clone_into(total);
        }
    }

    fn indicator(&mut self) -> Option<&mut dyn NotificationIndicator> {
        self.badge
            .as_mut()
            .map(|badge| badge as &mut dyn NotificationIndicator)
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!(notice = message, "Cart notice shown");
        self.alerts.push(message.to_owned());
    }
}
