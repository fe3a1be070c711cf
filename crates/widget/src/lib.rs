//! Carrito Widget - Cart dropdown synchronization.
//!
//! Keeps the navbar cart dropdown in sync with the cart backend:
//!
//! 1. Resolve the user's identity token from page storage ([`identity`])
//! 2. Fetch the authoritative cart ([`client`])
//! 3. Mirror it into page storage ([`state`])
//! 4. Render it into the dropdown ([`render`], [`page`])
//!
//! [`CartWidget`] owns the cart state and drives that sequence for page
//! load, add, remove, clear and logout.
//!
//! # Example
//!
//! ```rust,no_run
//! use carrito_widget::{CartClient, CartWidget, DropdownPage, MemoryStore, WidgetConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WidgetConfig::from_env()?;
//! let client = CartClient::new(&config)?;
//! let mut widget = CartWidget::new(client, MemoryStore::default(), DropdownPage::standard(), &config);
//!
//! widget.init().await;
//! println!("{} items", widget.state().item_count());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod html;
pub mod identity;
pub mod notices;
pub mod page;
pub mod render;
pub mod state;
pub mod storage;
pub mod widget;

pub use client::{CartClient, CartError};
pub use config::{ConfigError, FetchFailurePolicy, WidgetConfig};
pub use identity::resolve_identity;
pub use page::{
    Badge, BadgeVariant, CartRow, DeleteAction, DropdownPage, NotificationIndicator, Page,
};
pub use state::{CartState, Mirror};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use widget::{AddOutcome, CartWidget, RemoveOutcome};
