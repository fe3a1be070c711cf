//! Carrito Core - Shared cart types.
//!
//! This crate provides the types shared by every carrito component:
//! - `widget` - Cart synchronization, mirror and dropdown rendering
//! - `cli` - Command-line driver for the widget
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Cart items, backend ids, identity tokens and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
