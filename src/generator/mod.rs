//! Site metadata generators.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//! - **Robots**: crawler rules (`robots.txt`)
//! - **Analytics**: GA4 bootstrap script (`analytics.js`)
//!
//! Each generator renders to memory so the same output can be written by
//! `build` and served by `serve`.

pub mod analytics;
pub mod robots;
pub mod sitemap;

use std::borrow::Cow;

/// Minify XML content if enabled.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        let xml_str = String::from_utf8_lossy(content);
        let minified = xml_str
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<String>();
        Cow::Owned(minified.into_bytes())
    } else {
        Cow::Borrowed(content)
    }
}
