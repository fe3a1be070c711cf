//! Cart backend HTTP client.
//!
//! Four single-shot operations against `{base}/carrito`. Nothing is retried
//! or debounced; overlapping calls are not coordinated and the later response
//! simply wins.
//!
//! Each write operation has a fallible `try_*` form. The read path and the
//! boolean forms swallow errors after logging them, so a broken backend
//! degrades the dropdown instead of breaking the page.

use carrito_core::{CartItem, IdentityToken, ItemId, NewCartItem};
use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::WidgetConfig;

/// Collection path segment.
const COLLECTION: &str = "carrito";

/// Query parameter scoping a request to one user.
const IDENTITY_PARAM: &str = "usuario_email";

/// Errors that can occur when talking to the cart backend.
#[derive(Debug, Error)]
pub enum CartError {
    /// Transport failure (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body had an unexpected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Created item came back without an `_id`.
    #[error("Backend did not return an id for the new item")]
    MissingId,

    /// An item id is blank and cannot address a single line.
    #[error("Item id is blank")]
    BlankId,

    /// Base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl CartError {
    /// Message suitable for a user-facing notice.
    ///
    /// Backend validation details are passed through; transport details are not.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Api { status, message } if (400..500).contains(status) && !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// Response of `POST /carrito`.
#[derive(Debug, Deserialize)]
struct Created {
    #[serde(rename = "_id", default)]
    id: Option<String>,
}

/// Error body of a FastAPI-style backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// HTTP client for the cart backend.
#[derive(Debug, Clone)]
pub struct CartClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CartClient {
    /// Create a new cart client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WidgetConfig) -> Result<Self, CartError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the cart, returning an empty cart on any failure.
    pub async fn fetch_cart(&self, identity: Option<&IdentityToken>) -> Vec<CartItem> {
        match self.try_fetch_cart(identity).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load cart");
                Vec::new()
            }
        }
    }

    /// Fetch the cart.
    ///
    /// A successful response whose body is not a JSON array is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or an array
    /// containing entries that are not cart items.
    #[instrument(skip(self, identity), fields(scoped = identity.is_some()))]
    pub async fn try_fetch_cart(
        &self,
        identity: Option<&IdentityToken>,
    ) -> Result<Vec<CartItem>, CartError> {
        let url = self.endpoint(None, identity)?;
        let response = check_status(self.client.get(url).send().await?).await?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CartError::Parse(e.to_string()))?;

        match body {
            serde_json::Value::Array(_) => {
                let items: Vec<CartItem> =
                    serde_json::from_value(body).map_err(|e| CartError::Parse(e.to_string()))?;
                tracing::debug!(count = items.len(), "Cart fetched");
                Ok(items)
            }
            other => {
                tracing::warn!(kind = json_kind(&other), "Cart response is not an array");
                Ok(Vec::new())
            }
        }
    }

    /// Persist `item` as a new cart line with quantity 1.
    ///
    /// Returns the item as stored, carrying its backend id.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status, or a response
    /// without an `_id`.
    #[instrument(skip(self, item, identity), fields(name = %item.name))]
    pub async fn add_item(
        &self,
        item: &CartItem,
        identity: Option<&IdentityToken>,
    ) -> Result<CartItem, CartError> {
        let url = self.endpoint(None, None)?;
        let body = NewCartItem::from_item(item, identity.map(IdentityToken::as_str));

        let response = check_status(self.client.post(url).json(&body).send().await?).await?;

        let created: Created = response
            .json()
            .await
            .map_err(|e| CartError::Parse(e.to_string()))?;
        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or(CartError::MissingId)?;

        tracing::info!(id = %id, "Item added to cart");
        Ok(CartItem {
            id: Some(ItemId::new(id)),
            quantity: 1,
            ..item.clone()
        })
    }

    /// Delete one cart line, returning whether the backend accepted it.
    pub async fn remove_item(&self, id: &ItemId, identity: Option<&IdentityToken>) -> bool {
        match self.try_remove_item(id, identity).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to remove cart item");
                false
            }
        }
    }

    /// Delete one cart line.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status.
    #[instrument(skip(self, identity))]
    pub async fn try_remove_item(
        &self,
        id: &ItemId,
        identity: Option<&IdentityToken>,
    ) -> Result<(), CartError> {
        let url = self.endpoint(Some(id), identity)?;
        check_status(self.client.delete(url).send().await?).await?;
        tracing::info!(id = %id, "Item removed from cart");
        Ok(())
    }

    /// Empty the cart, returning whether the backend accepted it.
    pub async fn clear_cart(&self, identity: Option<&IdentityToken>) -> bool {
        match self.try_clear_cart(identity).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear cart");
                false
            }
        }
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status.
    #[instrument(skip(self, identity), fields(scoped = identity.is_some()))]
    pub async fn try_clear_cart(&self, identity: Option<&IdentityToken>) -> Result<(), CartError> {
        let url = self.endpoint(None, identity)?;
        check_status(self.client.delete(url).send().await?).await?;
        tracing::info!("Cart cleared");
        Ok(())
    }

    /// Build `{base}/carrito[/{id}][?usuario_email=...]`.
    fn endpoint(
        &self,
        id: Option<&ItemId>,
        identity: Option<&IdentityToken>,
    ) -> Result<Url, CartError> {
        if id.is_some_and(|id| id.as_str().trim().is_empty()) {
            return Err(CartError::BlankId);
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CartError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        if let Some(identity) = identity {
            url.query_pairs_mut()
                .append_pair(IDENTITY_PARAM, identity.as_str());
        }
        Ok(url)
    }
}

/// Turn a non-success response into [`CartError::Api`].
async fn check_status(response: Response) -> Result<Response, CartError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map_or(text, |body| match body.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        });

    Err(CartError::Api {
        status: status.as_u16(),
        message,
    })
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
