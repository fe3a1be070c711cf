//! Login state commands.
//!
//! `login` writes the user object a login page would leave behind, so the
//! widget resolves the identity the same way it does in the browser.

use std::path::Path;

use carrito_core::{IdentityError, IdentityToken};
use carrito_widget::storage::keys;
use carrito_widget::{FileStore, KeyValueStore, WidgetConfig, resolve_identity};
use thiserror::Error;

use super::open_widget;
use crate::output;

/// Login command errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] IdentityError),

    #[error("'{0}' does not look like an email address")]
    NotAnEmail(String),
}

/// Store a logged-in user.
///
/// # Errors
///
/// Returns an error if the email is invalid or the storage file is unreadable.
pub fn login(store_path: &Path, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let token = IdentityToken::parse(email).map_err(SessionError::from)?;
    if !token.looks_like_email() {
        return Err(SessionError::NotAnEmail(token.into_inner()).into());
    }

    let mut store = FileStore::open(store_path)?;
    let user = serde_json::json!({ "correo": token.as_str() });
    store.set(keys::USER, &user.to_string());
    // Re-resolved from the user object on next load.
    store.remove(keys::IDENTITY);

    tracing::info!(identity = %token, "Logged in");
    output::line(&format!("Logged in as {token}"))?;
    Ok(())
}

/// Forget the logged-in user and empty the dropdown.
///
/// The backend cart is left alone.
///
/// # Errors
///
/// Returns an error if the storage file is unreadable or output fails.
pub fn logout(config: &WidgetConfig, store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = open_widget(config, store_path)?;
    widget.store_mut().remove(keys::IDENTITY);
    widget.store_mut().remove(keys::USER);
    widget.clear_ui();

    tracing::info!("Logged out");
    output::dropdown(widget.page(), widget.state())?;
    Ok(())
}

/// Print the identity cart requests are scoped to.
///
/// # Errors
///
/// Returns an error if the storage file is unreadable or output fails.
pub fn whoami(store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open(store_path)?;
    match resolve_identity(&mut store) {
        Some(identity) => output::line(identity.as_str())?,
        None => output::line("(anonymous)")?,
    }
    Ok(())
}
