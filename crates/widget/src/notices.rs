//! User-facing notice texts.

/// Add refused because the item is already in the cart.
pub const ALREADY_IN_CART: &str = "El producto ya está en el carrito";

/// Add failed.
pub const ADD_FAILED: &str = "No se pudo agregar el producto al carrito";

/// Remove failed.
pub const REMOVE_FAILED: &str = "No se pudo eliminar el producto del carrito";

/// Clear failed.
pub const CLEAR_FAILED: &str = "No se pudo vaciar el carrito";

/// `base`, followed by the backend's explanation when it gave one.
#[must_use]
pub fn with_detail(base: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{base}: {detail}"),
        None => base.to_owned(),
    }
}
