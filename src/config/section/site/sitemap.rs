//! `[site.sitemap]` configuration.
//!
//! ```toml
//! [site.sitemap]
//! enable = true
//! pages = [
//!     { path = "/", changefreq = "weekly", priority = 1.0 },
//!     { path = "/products", changefreq = "daily", priority = 0.9 },
//! ]
//! ```
//!
//! An empty `pages` list falls back to the landing page's fixed routes.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// `<changefreq>` values from the sitemaps.org schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One listed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapPage {
    /// Path relative to the site URL, starting with `/`.
    pub path: String,
    #[serde(default)]
    pub changefreq: ChangeFreq,
    #[serde(default = "default_priority")]
    pub priority: f32,
    /// `YYYY-MM-DD`; defaults to the generation date.
    #[serde(default)]
    pub lastmod: Option<String>,
}

const fn default_priority() -> f32 {
    0.5
}

impl SitemapPage {
    fn fixed(path: &str, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            path: path.into(),
            changefreq,
            priority,
            lastmod: None,
        }
    }
}

/// Routes of the landing page, used when no pages are configured.
fn default_pages() -> Vec<SitemapPage> {
    vec![
        SitemapPage::fixed("/", ChangeFreq::Weekly, 1.0),
        SitemapPage::fixed("/products", ChangeFreq::Daily, 0.9),
        SitemapPage::fixed("/about", ChangeFreq::Monthly, 0.7),
        SitemapPage::fixed("/contact", ChangeFreq::Yearly, 0.5),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site.sitemap")]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    #[config(default = "true", inline_doc)]
    pub enable: bool,

    /// Output path for sitemap file.
    #[config(default = "sitemap.xml", inline_doc)]
    pub path: PathBuf,

    /// Listed pages; empty means the built-in route list.
    #[config(hidden)]
    pub pages: Vec<SitemapPage>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
            pages: Vec::new(),
        }
    }
}

impl SitemapConfig {
    /// Configured pages, or the built-in list when none are configured.
    pub fn pages(&self) -> Vec<SitemapPage> {
        if self.pages.is_empty() {
            default_pages()
        } else {
            self.pages.clone()
        }
    }

    /// Validate sitemap pages.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for page in &self.pages {
            if !page.path.starts_with('/') {
                diag.error_with_hint(
                    Self::FIELDS.pages,
                    format!("page path `{}` must start with `/`", page.path),
                    format!("use \"/{}\"", page.path),
                );
            }
            if !(0.0..=1.0).contains(&page.priority) {
                diag.error(
                    Self::FIELDS.pages,
                    format!(
                        "priority {} of `{}` is outside 0.0..=1.0",
                        page.priority, page.path
                    ),
                );
            }
            if let Some(lastmod) = &page.lastmod
                && crate::utils::date::DateTimeUtc::parse(lastmod).is_none()
            {
                diag.error_with_hint(
                    Self::FIELDS.pages,
                    format!("lastmod `{lastmod}` of `{}` is not a date", page.path),
                    "use YYYY-MM-DD",
                );
            }
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
        assert!(config.site.sitemap.enable);
        assert_eq!(config.site.sitemap.path, PathBuf::from("sitemap.xml"));
        assert_eq!(config.site.sitemap.pages().len(), 4);
    }

    #[test]
    fn test_custom_pages() {
        let config = test_parse_config(
            "[site.sitemap]\npages = [{ path = \"/\", changefreq = \"daily\", priority = 0.8 }, { path = \"/faq\" }]",
        );
        let pages = config.site.sitemap.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].changefreq, ChangeFreq::Daily);
        assert_eq!(pages[1].changefreq, ChangeFreq::Weekly);
        assert_eq!(pages[1].priority, 0.5);
    }

    #[test]
    fn test_validate_pages() {
        let config = SitemapConfig {
            pages: vec![
                SitemapPage {
                    path: "about".into(),
                    changefreq: ChangeFreq::Never,
                    priority: 1.5,
                    lastmod: Some("yesterday".into()),
                },
                SitemapPage::fixed("/ok", ChangeFreq::Daily, 0.3),
            ],
            ..SitemapConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
