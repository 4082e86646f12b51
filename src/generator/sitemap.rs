//! Sitemap generation.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://acme.example/products</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>0.9</priority>
//!   </url>
//! </urlset>
//! ```

use crate::config::{SiteConfig, SiteInfoConfig, SitemapPage};
use crate::generator::minify_xml;
use crate::utils::date;
use crate::warn_once;
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render `sitemap.xml`, or `None` when disabled or the site URL is unknown.
pub fn render_sitemap(config: &SiteConfig) -> Option<Vec<u8>> {
    if !config.site.sitemap.enable {
        return None;
    }
    let Some(base_url) = config.site.info.base_url() else {
        warn_once!("sitemap skipped: {} is not set", SiteInfoConfig::FIELDS.url);
        return None;
    };

    let xml = Sitemap::new(base_url, &config.site.sitemap.pages(), &date::today()).into_xml();
    Some(minify_xml(xml.as_bytes(), config.build.minify).into_owned())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: f32,
}

impl Sitemap {
    fn new(base_url: &str, pages: &[SitemapPage], today: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let urls = pages
            .iter()
            .map(|page| UrlEntry {
                loc: format!("{base_url}{}", page.path),
                lastmod: page.lastmod.clone().unwrap_or_else(|| today.to_string()),
                changefreq: page.changefreq.as_str(),
                priority: page.priority,
            })
            .collect();
        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&escape_xml(&entry.lastmod));
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq);
            xml.push_str("</changefreq>\n    <priority>");
            xml.push_str(&format!("{:.1}", entry.priority));
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
