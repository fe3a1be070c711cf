//! Core types for carrito.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod id;
pub mod identity;
pub mod price;

pub use cart::{CartItem, NewCartItem, PLACEHOLDER_IMAGE, PLACEHOLDER_NAME};
pub use id::*;
pub use identity::{IdentityError, IdentityToken};
pub use price::Price;
