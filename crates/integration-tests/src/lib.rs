//! Integration tests for the carrito cart dropdown.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p carrito-integration-tests
//! ```
//!
//! The backend is a `wiremock` server; no external services are needed.
//!
//! # Helpers
//!
//! [`widget_for`] binds a widget with in-memory storage and a full headless
//! dropdown page to a mock backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

use carrito_widget::{
    CartClient, CartWidget, DropdownPage, FetchFailurePolicy, MemoryStore, WidgetConfig,
};

/// Widget type used throughout the tests.
pub type TestWidget = CartWidget<MemoryStore, DropdownPage>;

/// Build a widget against `base_url`.
///
/// # Panics
///
/// Panics if `base_url` is not a valid http(s) URL.
#[must_use]
pub fn widget_for(base_url: &str, store: MemoryStore, policy: FetchFailurePolicy) -> TestWidget {
    widget_on_page(base_url, store, DropdownPage::standard(), policy)
}

/// Build a widget against `base_url` bound to `page`.
///
/// # Panics
///
/// Panics if `base_url` is not a valid http(s) URL.
#[must_use]
pub fn widget_on_page(
    base_url: &str,
    store: MemoryStore,
    page: DropdownPage,
    policy: FetchFailurePolicy,
) -> TestWidget {
    let config = WidgetConfig::default()
        .with_api_base_url(base_url)
        .expect("valid base URL")
        .with_fetch_fallback(policy);
    let client = CartClient::new(&config).expect("HTTP client");
    CartWidget::new(client, store, page, &config)
}
