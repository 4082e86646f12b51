//! `robots.txt` generation.

use crate::config::SiteConfig;

/// Render `robots.txt`, or `None` when disabled.
///
/// The `Sitemap:` line is only emitted when a sitemap can actually be
/// generated, i.e. it is enabled and the site URL is known.
pub fn render_robots(config: &SiteConfig) -> Option<String> {
    let robots = &config.site.robots;
    if !robots.enable {
        return None;
    }

    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in robots.disallow.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        out.push_str("Disallow: ");
        out.push_str(path);
        out.push('\n');
    }

    if config.site.sitemap.enable
        && let Some(base_url) = config.site.info.base_url()
    {
        let path = config.site.sitemap.path.to_string_lossy();
        out.push_str(&format!(
            "\nSitemap: {base_url}/{}\n",
            path.trim_start_matches('/')
        ));
    }

    Some(out)
}
