//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "Acme Trail Shoes"
//! description = "Lightweight shoes for long days"
//! url = "https://acme.example"
//!
//! [site.sitemap]
//! enable = true
//!
//! [site.robots]
//! disallow = ["/cart"]
//!
//! [site.analytics]
//! measurement_id = "G-ABC123"
//! ```

mod analytics;
mod info;
mod robots;
mod sitemap;

pub use analytics::AnalyticsConfig;
pub use info::SiteInfoConfig;
pub use robots::RobotsConfig;
pub use sitemap::{ChangeFreq, SitemapConfig, SitemapPage};

use serde::{Deserialize, Serialize};

/// Site section configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub info: SiteInfoConfig,
    pub sitemap: SitemapConfig,
    pub robots: RobotsConfig,
    pub analytics: AnalyticsConfig,
}
