//! Admin API client (REST).

use super::types::{Customer, Fulfillment, Order, Tracking};
use super::{CommerceError, read_json, swallow};
use crate::config::ShopifyConfig;
use crate::{debug, warn_once};
use serde::Deserialize;
use serde_json::json;

const TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Page size used when no limit is given.
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct CustomersEnvelope {
    customers: Vec<Customer>,
}

#[derive(Deserialize)]
struct FulfillmentEnvelope {
    fulfillment: Fulfillment,
}

/// Client for `https://<domain>/admin/api/<version>/`.
#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Build from config, or `None` (with a one-time warning) in degraded mode.
    pub fn from_config(config: &ShopifyConfig) -> Option<Self> {
        match Self::try_from_config(config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn_once!("{e}; admin calls return nothing");
                None
            }
        }
    }

    pub fn try_from_config(config: &ShopifyConfig) -> Result<Self, CommerceError> {
        let domain = config
            .domain()
            .ok_or(CommerceError::NotConfigured("shopify.store_domain"))?;
        let token = config
            .admin_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(CommerceError::NotConfigured("shopify.admin_token"))?;
        Ok(Self::new(
            format!("https://{domain}/admin/api/{}/", config.api_version),
            token,
        ))
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn try_orders(&self, limit: u32) -> Result<Vec<Order>, CommerceError> {
        let url = self.url(&format!("orders.json?status=any&limit={limit}"));
        debug!("shop"; "GET {url}");
        let request = self.http.get(&url).header(TOKEN_HEADER, &self.token);
        let envelope: OrdersEnvelope = read_json(&url, request).await?;
        Ok(envelope.orders)
    }

    /// Most recent orders of any status; empty on failure.
    pub async fn orders(&self, limit: u32) -> Vec<Order> {
        swallow("order listing", self.try_orders(limit).await).unwrap_or_default()
    }

    pub async fn try_customers(&self, limit: u32) -> Result<Vec<Customer>, CommerceError> {
        let url = self.url(&format!("customers.json?limit={limit}"));
        debug!("shop"; "GET {url}");
        let request = self.http.get(&url).header(TOKEN_HEADER, &self.token);
        let envelope: CustomersEnvelope = read_json(&url, request).await?;
        Ok(envelope.customers)
    }

    /// Customers; empty on failure.
    pub async fn customers(&self, limit: u32) -> Vec<Customer> {
        swallow("customer listing", self.try_customers(limit).await).unwrap_or_default()
    }

    pub async fn try_create_fulfillment(
        &self,
        order_id: u64,
        tracking: &Tracking,
    ) -> Result<Fulfillment, CommerceError> {
        let url = self.url(&format!("orders/{order_id}/fulfillments.json"));
        debug!("shop"; "POST {url}");
        let request = self
            .http
            .post(&url)
            .header(TOKEN_HEADER, &self.token)
            .json(&json!({ "fulfillment": tracking }));
        let envelope: FulfillmentEnvelope = read_json(&url, request).await?;
        Ok(envelope.fulfillment)
    }

    /// Mark an order fulfilled; `None` on failure.
    pub async fn create_fulfillment(
        &self,
        order_id: u64,
        tracking: &Tracking,
    ) -> Option<Fulfillment> {
        swallow(
            "fulfillment",
            self.try_create_fulfillment(order_id, tracking).await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::stub::serve_once;

    fn client(base_url: &str) -> AdminClient {
        AdminClient::new(format!("{base_url}/admin/api/2024-01"), "admin-token")
    }

    #[test]
    fn test_from_config_base_url() {
        let config = ShopifyConfig {
            store_domain: Some("acme.myshopify.com".into()),
            admin_token: Some("shpat_x".into()),
            ..ShopifyConfig::default()
        };
        let client = AdminClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://acme.myshopify.com/admin/api/2024-01/");
    }

    #[test]
    fn test_from_config_without_token() {
        let config = ShopifyConfig {
            store_domain: Some("acme.myshopify.com".into()),
            ..ShopifyConfig::default()
        };
        assert!(AdminClient::from_config(&config).is_none());
    }

    #[tokio::test]
    async fn test_orders() {
        let stub = serve_once(
            200,
            r##"{ "orders": [ {
                "id": 450789469, "name": "#1001", "email": "kim@example.com",
                "created_at": "2024-03-01T10:00:00-05:00",
                "financial_status": "paid", "fulfillment_status": null,
                "total_price": "178.00", "currency": "EUR",
                "line_items": [ { "id": 1, "title": "Trail Runner", "quantity": 2, "price": "89.00" } ]
            } ] }"##,
        );
        let orders = client(&stub.base_url).orders(5).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].name, "#1001");
        assert_eq!(orders[0].line_items[0].quantity, 2);

        let request = stub.captured();
        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "/admin/api/2024-01/orders.json?status=any&limit=5");
        assert_eq!(request.header(TOKEN_HEADER), Some("admin-token"));
    }

    #[tokio::test]
    async fn test_customers() {
        let stub = serve_once(
            200,
            r#"{ "customers": [ { "id": 7, "email": "kim@example.com", "first_name": "Kim" } ] }"#,
        );
        let customers = client(&stub.base_url).customers(DEFAULT_LIMIT).await;
        assert_eq!(customers[0].first_name.as_deref(), Some("Kim"));
        assert_eq!(stub.captured().url, "/admin/api/2024-01/customers.json?limit=10");
    }

    #[tokio::test]
    async fn test_server_error_is_empty() {
        let stub = serve_once(500, "{}");
        assert!(client(&stub.base_url).customers(3).await.is_empty());
    }

    #[tokio::test]
    async fn test_status_error_exposed_by_try() {
        let stub = serve_once(403, "{}");
        let result = client(&stub.base_url).try_orders(1).await;
        assert!(matches!(
            result,
            Err(CommerceError::Status { status, .. }) if status == reqwest::StatusCode::FORBIDDEN
        ));
    }

    #[tokio::test]
    async fn test_create_fulfillment() {
        let stub = serve_once(
            201,
            r#"{ "fulfillment": { "id": 255858046, "order_id": 450789469,
                 "status": "success", "tracking_number": "1Z999", "tracking_company": "UPS" } }"#,
        );
        let tracking = Tracking {
            number: Some("1Z999".into()),
            company: Some("UPS".into()),
        };
        let fulfillment = client(&stub.base_url)
            .create_fulfillment(450789469, &tracking)
            .await
            .unwrap();
        assert_eq!(fulfillment.order_id, 450789469);

        let request = stub.captured();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/admin/api/2024-01/orders/450789469/fulfillments.json");
        assert_eq!(request.json()["fulfillment"]["tracking_company"], "UPS");
    }

    #[tokio::test]
    async fn test_malformed_body_is_none() {
        let stub = serve_once(200, r#"{ "unexpected": true }"#);
        let tracking = Tracking::default();
        assert!(client(&stub.base_url).create_fulfillment(1, &tracking).await.is_none());
    }
}
