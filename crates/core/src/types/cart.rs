//! Cart line types and their wire format.
//!
//! The backend speaks Spanish field names (`nombre`, `precio`, `imagen`,
//! `cantidad`) and tags persisted documents with `_id`. The same shape is
//! used for the local mirror, so a mirrored cart reads back exactly like a
//! fetched one.

use serde::{Deserialize, Deserializer, Serialize};

use super::{ItemId, Price};

/// Image shown when an item has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/40";

/// Name shown when an item has an empty name.
pub const PLACEHOLDER_NAME: &str = "Producto";

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Backend id; `None` until the item is persisted remotely.
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_id"
    )]
    pub id: Option<ItemId>,
    /// May be empty; see [`CartItem::display_name`].
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "precio", default)]
    pub price: Price,
    #[serde(
        rename = "imagen",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image: Option<String>,
    /// Always at least 1.
    #[serde(
        rename = "cantidad",
        default = "default_quantity",
        deserialize_with = "positive_quantity"
    )]
    pub quantity: u32,
}

impl CartItem {
    /// Create an unpersisted item with quantity 1.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            image: None,
            quantity: 1,
        }
    }

    /// Set the backend id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the image URL. Empty URLs are ignored.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.image = (!image.is_empty()).then_some(image);
        self
    }

    /// Set the quantity, clamped to at least 1.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// `price × quantity`.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Name for display, falling back to [`PLACEHOLDER_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            PLACEHOLDER_NAME
        } else {
            &self.name
        }
    }

    /// Image URL for display, falling back to [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Body of `POST /carrito`.
///
/// Quantity is always sent as 1; the backend keeps one document per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCartItem<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "imagen")]
    pub image: &'a str,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_email: Option<&'a str>,
}

impl<'a> NewCartItem<'a> {
    /// Build the request body for `item`, scoped to `identity` when present.
    #[must_use]
    pub fn from_item(item: &'a CartItem, identity: Option<&'a str>) -> Self {
        Self {
            name: &item.name,
            price: item.price,
            image: item.image.as_deref().unwrap_or_default(),
            quantity: 1,
            usuario_email: identity,
        }
    }
}

const fn default_quantity() -> u32 {
    1
}

fn positive_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let quantity = u32::try_from(Price::from_json(&value).amount()).unwrap_or(u32::MAX);
    Ok(quantity.max(1))
}

/// Strings pass through; `null` and any other JSON type read as empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn non_empty_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = lenient_string(deserializer)?;
    Ok((!value.trim().is_empty()).then_some(value))
}

fn non_empty_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ItemId>, D::Error> {
    let id = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => return Ok(None),
    };
    Ok((!id.trim().is_empty()).then(|| ItemId::from(id)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_item() {
        let json = r#"{"_id":"66a1","nombre":"Polera","precio":12990,"imagen":"https://cdn/p.png"}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, Some(ItemId::new("66a1")));
        assert_eq!(item.name, "Polera");
        assert_eq!(item.price, Price::new(12_990));
        assert_eq!(item.image.as_deref(), Some("https://cdn/p.png"));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_empty_image_and_id_are_absent() {
        let json = r#"{"_id":"","nombre":"Gorro","precio":"4500","imagen":""}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, None);
        assert_eq!(item.image, None);
        assert_eq!(item.price, Price::new(4500));
        assert_eq!(item.display_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_null_name_falls_back_to_placeholder() {
        let json = r#"[{"_id":"a1","nombre":null,"precio":1000},{"_id":"b2","nombre":"Gorro","precio":500}]"#;
        let items: Vec<CartItem> = serde_json::from_str(json).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "");
        assert_eq!(items[0].display_name(), PLACEHOLDER_NAME);
        assert_eq!(items[1].display_name(), "Gorro");
    }

    #[test]
    fn test_non_string_fields_are_tolerated() {
        let json = r#"{"_id":42,"nombre":7,"precio":100,"imagen":null}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, Some(ItemId::new("42")));
        assert_eq!(item.display_name(), PLACEHOLDER_NAME);
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_zero_quantity_clamped() {
        let json = r#"{"nombre":"Taza","precio":3000,"cantidad":0}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new("Taza", Price::new(1000)).with_quantity(3);
        assert_eq!(item.line_total(), Price::new(3000));
    }

    #[test]
    fn test_display_name_fallback() {
        let item = CartItem::new("", Price::ZERO);
        assert_eq!(item.display_name(), PLACEHOLDER_NAME);
    }

    #[test]
    fn test_mirror_shape_reads_back() {
        let item = CartItem::new("Polera", Price::new(12_990))
            .with_id("66a1")
            .with_image("https://cdn/p.png")
            .with_quantity(2);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"_id\":\"66a1\""));
        assert!(json.contains("\"cantidad\":2"));

        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_new_cart_item_body() {
        let item = CartItem::new("Polera", Price::new(12_990)).with_quantity(4);
        let body = serde_json::to_value(NewCartItem::from_item(&item, Some("a@b.com"))).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "nombre": "Polera",
                "precio": 12990,
                "imagen": "",
                "cantidad": 1,
                "usuario_email": "a@b.com",
            })
        );
    }

    #[test]
    fn test_new_cart_item_body_without_identity() {
        let item = CartItem::new("Polera", Price::new(1));
        let body = serde_json::to_value(NewCartItem::from_item(&item, None)).unwrap();
        assert!(body.get("usuario_email").is_none());
    }
}
