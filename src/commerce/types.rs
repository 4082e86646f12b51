//! Storefront (GraphQL, camelCase) and Admin (REST, snake_case) payloads.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Flatten a GraphQL connection (`{ edges: [{ node }] }`) into its nodes.
pub(super) fn edges<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Connection<T> {
        edges: Vec<Edge<T>>,
    }

    #[derive(Deserialize)]
    struct Edge<T> {
        node: T,
    }

    let connection = Connection::<T>::deserialize(deserializer)?;
    Ok(connection.edges.into_iter().map(|e| e.node).collect())
}

// ============================================================================
// Storefront
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub available_for_sale: bool,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub featured_image: Option<Image>,
    pub price_range: PriceRange,
    #[serde(deserialize_with = "edges", default)]
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub merchandise: Merchandise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub checkout_url: String,
    #[serde(default)]
    pub total_quantity: u32,
    pub cost: CartCost,
    #[serde(deserialize_with = "edges", default)]
    pub lines: Vec<CartLine>,
}

/// Line to add to a cart: a variant id and a quantity.
///
/// Parses from `<variant>` or `<variant>:<qty>`. Variant ids are usually
/// `gid://shopify/ProductVariant/<n>`, so only a numeric suffix after the
/// last `:` is taken as the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

impl CartLineInput {
    pub fn new(merchandise_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            merchandise_id: merchandise_id.into(),
            quantity,
        }
    }
}

impl FromStr for CartLineInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (id, quantity) = match s.rsplit_once(':') {
            Some((id, qty)) if !qty.is_empty() && qty.bytes().all(|b| b.is_ascii_digit()) => {
                let qty = qty.parse().map_err(|e| format!("quantity `{qty}`: {e}"))?;
                (id, qty)
            }
            _ => (s, 1),
        };
        if id.is_empty() {
            return Err("variant id is empty".into());
        }
        if quantity == 0 {
            return Err("quantity must be at least 1".into());
        }
        Ok(Self::new(id, quantity))
    }
}

/// `userErrors` entry of a storefront mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl UserError {
    pub fn describe(&self) -> String {
        match &self.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), self.message),
            _ => self.message.clone(),
        }
    }
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    pub total_price: String,
    pub currency: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub id: u64,
    pub order_id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_company: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
}

/// Tracking details sent with a new fulfillment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tracking {
    #[serde(rename = "tracking_number", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "tracking_company", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_flattens_variant_edges() {
        let product: Product = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "handle": "trail-runner",
            "title": "Trail Runner",
            "featuredImage": null,
            "priceRange": { "minVariantPrice": { "amount": "89.0", "currencyCode": "EUR" } },
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "42",
                    "availableForSale": true,
                    "price": { "amount": "89.0", "currencyCode": "EUR" }
                } }
            ] }
        }))
        .unwrap();

        assert_eq!(product.description, "");
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].title, "42");
        assert_eq!(product.price_range.min_variant_price.currency_code, "EUR");
    }

    #[test]
    fn test_cart_line_input_parse() {
        assert_eq!(
            "gid://shopify/ProductVariant/11:3".parse::<CartLineInput>(),
            Ok(CartLineInput::new("gid://shopify/ProductVariant/11", 3))
        );
        assert_eq!(
            "gid://shopify/ProductVariant/11".parse::<CartLineInput>(),
            Ok(CartLineInput::new("gid://shopify/ProductVariant/11", 1))
        );
        assert!("variant:0".parse::<CartLineInput>().is_err());
        assert!(":2".parse::<CartLineInput>().is_err());
    }

    #[test]
    fn test_cart_line_input_serializes_camel_case() {
        let value = serde_json::to_value(CartLineInput::new("v1", 2)).unwrap();
        assert_eq!(value, json!({ "merchandiseId": "v1", "quantity": 2 }));
    }

    #[test]
    fn test_tracking_skips_missing() {
        let tracking = Tracking {
            number: Some("1Z999".into()),
            company: None,
        };
        assert_eq!(
            serde_json::to_value(tracking).unwrap(),
            json!({ "tracking_number": "1Z999" })
        );
    }

    #[test]
    fn test_user_error_describe() {
        let err: UserError =
            serde_json::from_value(json!({ "field": ["lines", "0"], "message": "bad" })).unwrap();
        assert_eq!(err.describe(), "lines.0: bad");
    }
}
