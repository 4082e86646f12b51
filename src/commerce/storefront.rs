//! Storefront API client (GraphQL).

use super::types::{Cart, CartLineInput, Product, UserError, edges};
use super::{CommerceError, read_json, swallow};
use crate::config::ShopifyConfig;
use crate::{debug, warn_once};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

const TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Number of products fetched when no count is given.
pub const DEFAULT_PRODUCT_COUNT: u32 = 12;

const PRODUCT_FIELDS: &str = r#"
fragment ProductFields on Product {
  id
  handle
  title
  description
  featuredImage { url altText }
  priceRange { minVariantPrice { amount currencyCode } }
  variants(first: 10) {
    edges { node { id title availableForSale price { amount currencyCode } } }
  }
}
"#;

const CART_FIELDS: &str = r#"
fragment CartFields on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
  }
  lines(first: 50) {
    edges { node { id quantity merchandise { ... on ProductVariant { id title } } } }
  }
}
"#;

const PRODUCT_BY_HANDLE: &str = r#"
query ProductByHandle($handle: String!) {
  product(handle: $handle) { ...ProductFields }
}
"#;

const PRODUCTS: &str = r#"
query Products($first: Int!) {
  products(first: $first) { edges { node { ...ProductFields } } }
}
"#;

const CART_CREATE: &str = r#"
mutation CartCreate($lines: [CartLineInput!]) {
  cartCreate(input: { lines: $lines }) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
"#;

const CART_LINES_ADD: &str = r#"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { field message }
  }
}
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: String,
    variables: &'a V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlMessage>,
}

#[derive(Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Deserialize)]
struct ProductData {
    product: Option<Product>,
}

#[derive(Deserialize)]
struct ProductsData {
    #[serde(deserialize_with = "edges")]
    products: Vec<Product>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartPayload {
    cart: Option<Cart>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl CartPayload {
    fn into_result(self) -> Result<Option<Cart>, CommerceError> {
        if self.user_errors.is_empty() {
            Ok(self.cart)
        } else {
            Err(CommerceError::GraphQl(
                self.user_errors.iter().map(UserError::describe).collect(),
            ))
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: CartPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesAddData {
    cart_lines_add: CartPayload,
}

/// Client for `https://<domain>/api/<version>/graphql.json`.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl StorefrontClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Build from config, or `None` (with a one-time warning) in degraded mode.
    pub fn from_config(config: &ShopifyConfig) -> Option<Self> {
        match Self::try_from_config(config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn_once!("{e}; storefront calls return nothing");
                None
            }
        }
    }

    pub fn try_from_config(config: &ShopifyConfig) -> Result<Self, CommerceError> {
        let domain = config
            .domain()
            .ok_or(CommerceError::NotConfigured("shopify.store_domain"))?;
        let token = config
            .storefront_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(CommerceError::NotConfigured("shopify.storefront_token"))?;
        Ok(Self::new(
            format!("https://{domain}/api/{}/graphql.json", config.api_version),
            token,
        ))
    }

    #[cfg(test)]
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        fragment: &str,
        variables: &V,
    ) -> Result<T, CommerceError> {
        debug!("shop"; "POST {}", self.endpoint);
        let body = GraphQlRequest {
            query: format!("{query}{fragment}"),
            variables,
        };
        let request = self
            .http
            .post(&self.endpoint)
            .header(TOKEN_HEADER, &self.token)
            .json(&body);

        let response: GraphQlResponse<T> = read_json(&self.endpoint, request).await?;
        if !response.errors.is_empty() {
            return Err(CommerceError::GraphQl(
                response.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        response
            .data
            .ok_or_else(|| CommerceError::GraphQl(vec!["response has no data".into()]))
    }

    // ========================================================================
    // products
    // ========================================================================

    pub async fn try_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<Product>, CommerceError> {
        let data: ProductData = self
            .execute(PRODUCT_BY_HANDLE, PRODUCT_FIELDS, &json!({ "handle": handle }))
            .await?;
        Ok(data.product)
    }

    /// Product with the given handle; `None` when unknown or on failure.
    pub async fn product_by_handle(&self, handle: &str) -> Option<Product> {
        swallow("product lookup", self.try_product_by_handle(handle).await).flatten()
    }

    pub async fn try_products(&self, first: u32) -> Result<Vec<Product>, CommerceError> {
        let data: ProductsData = self
            .execute(PRODUCTS, PRODUCT_FIELDS, &json!({ "first": first }))
            .await?;
        Ok(data.products)
    }

    /// First `first` products; empty on failure.
    pub async fn products(&self, first: u32) -> Vec<Product> {
        swallow("product listing", self.try_products(first).await).unwrap_or_default()
    }

    // ========================================================================
    // carts
    // ========================================================================

    pub async fn try_create_cart(
        &self,
        lines: &[CartLineInput],
    ) -> Result<Option<Cart>, CommerceError> {
        let data: CartCreateData = self
            .execute(CART_CREATE, CART_FIELDS, &json!({ "lines": lines }))
            .await?;
        data.cart_create.into_result()
    }

    /// New cart holding `lines`; `None` on failure.
    pub async fn create_cart(&self, lines: &[CartLineInput]) -> Option<Cart> {
        swallow("cart creation", self.try_create_cart(lines).await).flatten()
    }

    pub async fn try_add_cart_lines(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> Result<Option<Cart>, CommerceError> {
        let data: CartLinesAddData = self
            .execute(
                CART_LINES_ADD,
                CART_FIELDS,
                &json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;
        data.cart_lines_add.into_result()
    }

    /// Updated cart; `None` on failure.
    pub async fn add_cart_lines(&self, cart_id: &str, lines: &[CartLineInput]) -> Option<Cart> {
        swallow("adding cart lines", self.try_add_cart_lines(cart_id, lines).await).flatten()
    }
}
