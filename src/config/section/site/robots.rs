//! `[site.robots]` configuration.

use macros::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site.robots")]
pub struct RobotsConfig {
    /// Generate robots.txt.
    #[config(default = "true", inline_doc)]
    pub enable: bool,

    /// Paths crawlers should skip.
    #[config(default = "[\"/cart\", \"/checkout\"]", inline_doc)]
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            disallow: vec!["/cart".into(), "/checkout".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.site.robots.enable);
        assert_eq!(config.site.robots.disallow, vec!["/cart", "/checkout"]);
    }

    #[test]
    fn test_override() {
        let config = test_parse_config("[site.robots]\ndisallow = []");
        assert!(config.site.robots.disallow.is_empty());
    }
}
