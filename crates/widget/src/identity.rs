//! Identity token resolution.
//!
//! Resolution order:
//! 1. The direct identity slot (`usuarioEmail`), returned exactly as stored.
//! 2. The `correo` field of the JSON user object (`usuario`).
//! 3. The raw `usuario` value, if it is not JSON and contains an `@`.
//!
//! A value found by steps 2 or 3 is written back to the direct slot so later
//! lookups skip the fallback. Nothing here fails: malformed data just means
//! "no value at this step".

use carrito_core::IdentityToken;

use crate::storage::{KeyValueStore, keys};

/// Resolve the current user's identity token from page storage.
///
/// Returns `None` when no identity is stored; callers then make unscoped
/// requests and the backend decides what cart to serve.
pub fn resolve_identity<S: KeyValueStore + ?Sized>(store: &mut S) -> Option<IdentityToken> {
    if let Some(token) = store.get(keys::IDENTITY).and_then(IdentityToken::from_stored) {
        return Some(token);
    }

    let blob = store.get(keys::USER)?;
    let token = from_user_blob(&blob)?;
    store.set(keys::IDENTITY, token.as_str());
    tracing::debug!("Identity resolved from stored user object");
    Some(token)
}

fn from_user_blob(blob: &str) -> Option<IdentityToken> {
    match serde_json::from_str::<serde_json::Value>(blob) {
        Ok(serde_json::Value::Object(user)) => user
            .get("correo")
            .and_then(serde_json::Value::as_str)
            .and_then(|correo| IdentityToken::parse(correo).ok()),
        // Valid JSON that is not a user object.
        Ok(_) => None,
        Err(_) => IdentityToken::parse(blob)
            .ok()
            .filter(IdentityToken::looks_like_email),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_direct_value_returned_unchanged() {
        let mut store = MemoryStore::with_entries([(keys::IDENTITY, "ana@tienda.cl")]);
        let token = resolve_identity(&mut store).unwrap();
        assert_eq!(token.as_str(), "ana@tienda.cl");
    }

    #[test]
    fn test_direct_value_is_not_normalized() {
        let mut store = MemoryStore::with_entries([(keys::IDENTITY, " a@b.com ")]);
        assert_eq!(resolve_identity(&mut store).unwrap().as_str(), " a@b.com ");

        let long = format!("{}@tienda.cl", "x".repeat(296));
        let mut store = MemoryStore::with_entries([
            (keys::IDENTITY, long.as_str()),
            (keys::USER, r#"{"correo":"blob@tienda.cl"}"#),
        ]);
        assert_eq!(resolve_identity(&mut store).unwrap().as_str(), long);
        assert_eq!(store.get(keys::IDENTITY).as_deref(), Some(long.as_str()));
    }

    #[test]
    fn test_direct_value_wins_over_user_blob() {
        let mut store = MemoryStore::with_entries([
            (keys::IDENTITY, "direct@tienda.cl"),
            (keys::USER, r#"{"correo":"blob@tienda.cl"}"#),
        ]);
        assert_eq!(resolve_identity(&mut store).unwrap().as_str(), "direct@tienda.cl");
    }

    #[test]
    fn test_user_blob_correo_is_written_back() {
        let mut store = MemoryStore::with_entries([(keys::USER, r#"{"correo":"a@b.com","nombres":"Ana"}"#)]);

        let token = resolve_identity(&mut store).unwrap();

        assert_eq!(token.as_str(), "a@b.com");
        assert_eq!(store.get(keys::IDENTITY).as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_raw_email_blob_is_written_back() {
        let mut store = MemoryStore::with_entries([(keys::USER, "a@b.com")]);

        let token = resolve_identity(&mut store).unwrap();

        assert_eq!(token.as_str(), "a@b.com");
        assert_eq!(store.get(keys::IDENTITY).as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_raw_non_email_blob_is_ignored() {
        let mut store = MemoryStore::with_entries([(keys::USER, "not json, no at sign")]);
        assert_eq!(resolve_identity(&mut store), None);
        assert_eq!(store.get(keys::IDENTITY), None);
    }

    #[test]
    fn test_json_without_correo() {
        let mut store = MemoryStore::with_entries([(keys::USER, r#"{"usuario":"ana"}"#)]);
        assert_eq!(resolve_identity(&mut store), None);
    }

    #[test]
    fn test_json_string_is_not_a_user_object() {
        let mut store = MemoryStore::with_entries([(keys::USER, r#""a@b.com""#)]);
        assert_eq!(resolve_identity(&mut store), None);
    }

    #[test]
    fn test_empty_direct_value_falls_through() {
        let mut store = MemoryStore::with_entries([
            (keys::IDENTITY, ""),
            (keys::USER, r#"{"correo":"a@b.com"}"#),
        ]);
        assert_eq!(resolve_identity(&mut store).unwrap().as_str(), "a@b.com");
        assert_eq!(store.get(keys::IDENTITY).as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_nothing_stored() {
        let mut store = MemoryStore::default();
        assert_eq!(resolve_identity(&mut store), None);
    }
}
