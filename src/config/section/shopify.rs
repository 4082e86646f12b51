//! `[shopify]` section configuration.
//!
//! ```toml
//! [shopify]
//! store_domain = "acme.myshopify.com"
//! api_version = "2024-01"
//! ```
//!
//! Tokens are normally supplied through the environment rather than
//! committed to the config file:
//! `SHOPIFY_STOREFRONT_ACCESS_TOKEN`, `SHOPIFY_ADMIN_ACCESS_TOKEN`.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// Shopify store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "shopify")]
pub struct ShopifyConfig {
    /// Store domain, e.g. "acme.myshopify.com".
    #[config(inline_doc)]
    pub store_domain: Option<String>,

    /// Storefront API access token (prefer SHOPIFY_STOREFRONT_ACCESS_TOKEN).
    #[config(inline_doc)]
    pub storefront_token: Option<String>,

    /// Admin API access token (prefer SHOPIFY_ADMIN_ACCESS_TOKEN).
    #[config(inline_doc)]
    pub admin_token: Option<String>,

    /// API version segment of the endpoint path.
    #[config(default = "2024-01", inline_doc)]
    pub api_version: String,
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            store_domain: None,
            storefront_token: None,
            admin_token: None,
            api_version: "2024-01".into(),
        }
    }
}

impl ShopifyConfig {
    /// Store domain with any scheme and trailing slash removed.
    pub fn domain(&self) -> Option<&str> {
        let domain = self.store_domain.as_deref()?.trim();
        let domain = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(domain)
            .trim_end_matches('/');
        (!domain.is_empty()).then_some(domain)
    }

    /// Validate shopify settings.
    ///
    /// Missing values are not errors (the client runs degraded), but a
    /// domain containing a path is.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(domain) = self.domain()
            && domain.contains('/')
        {
            diag.error_with_hint(
                Self::FIELDS.store_domain,
                format!("`{domain}` is not a bare domain"),
                "use format like acme.myshopify.com",
            );
        }
        if self.api_version.trim().is_empty() {
            diag.error(Self::FIELDS.api_version, "API version is empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.shopify.store_domain.is_none());
        assert_eq!(config.shopify.api_version, "2024-01");
    }

    #[test]
    fn test_domain_normalization() {
        let config = ShopifyConfig {
            store_domain: Some("https://acme.myshopify.com/".into()),
            ..ShopifyConfig::default()
        };
        assert_eq!(config.domain(), Some("acme.myshopify.com"));

        let blank = ShopifyConfig {
            store_domain: Some("   ".into()),
            ..ShopifyConfig::default()
        };
        assert_eq!(blank.domain(), None);
    }

    #[test]
    fn test_validate_domain_with_path() {
        let config = ShopifyConfig {
            store_domain: Some("acme.com/shop".into()),
            ..ShopifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
