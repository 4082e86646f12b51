//! Google Analytics 4 (`gtag.js`) bootstrap.
//!
//! The generated script loads `gtag.js` asynchronously and configures the
//! measurement id, so a page only needs the one `<script>` tag returned by
//! [`head_snippet`].

use crate::config::{AnalyticsConfig, SiteConfig};
use crate::warn_once;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const GTAG_URL: &str = "https://www.googletagmanager.com/gtag/js";

/// Query-value encoding; ids are `G-XXXX` so `-` stays readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Render the bootstrap script, or `None` (with a warning) when no
/// measurement id is configured.
pub fn render_script(config: &SiteConfig) -> Option<String> {
    let Some(id) = measurement_id(config) else {
        warn_once!(
            "analytics disabled: {} is not set (PUBLIC_GA_MEASUREMENT_ID)",
            AnalyticsConfig::FIELDS.measurement_id
        );
        return None;
    };

    let src = format!("{GTAG_URL}?id={}", utf8_percent_encode(id, QUERY_VALUE));
    // JSON string literals are valid JavaScript string literals
    let src = serde_json::Value::from(src).to_string();
    let id = serde_json::Value::from(id).to_string();

    Some(format!(
        r#"(function () {{
  var s = document.createElement("script");
  s.async = true;
  s.src = {src};
  document.head.appendChild(s);
  window.dataLayer = window.dataLayer || [];
  function gtag() {{ window.dataLayer.push(arguments); }}
  window.gtag = gtag;
  gtag("js", new Date());
  gtag("config", {id});
}})();
"#
    ))
}

/// `<script>` tag loading the bootstrap script from the site root.
pub fn head_snippet(config: &SiteConfig) -> Option<String> {
    measurement_id(config)?;
    let path = config.site.analytics.path.to_string_lossy();
    Some(format!(
        r#"<script async src="/{}"></script>"#,
        path.trim_start_matches('/')
    ))
}

fn measurement_id(config: &SiteConfig) -> Option<&str> {
    config.site.analytics.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_unconfigured() {
        let config = test_parse_config("");
        assert!(render_script(&config).is_none());
        assert!(head_snippet(&config).is_none());
    }

    #[test]
    fn test_script() {
        let config = test_parse_config("[site.analytics]\nmeasurement_id = \"G-ABC123\"");
        let script = render_script(&config).unwrap();
        assert!(
            script.contains(r#"s.src = "https://www.googletagmanager.com/gtag/js?id=G-ABC123";"#)
        );
        assert!(script.contains(r#"gtag("config", "G-ABC123");"#));
    }

    #[test]
    fn test_id_cannot_break_out_of_string() {
        let config = test_parse_config("[site.analytics]\nmeasurement_id = \"G-1\\\");alert(1)//\"");
        let script = render_script(&config).unwrap();
        assert!(script.contains(r#"gtag("config", "G-1\");alert(1)//");"#));
    }

    #[test]
    fn test_head_snippet_path() {
        let config = test_parse_config(
            "[site.analytics]\nmeasurement_id = \"G-ABC123\"\npath = \"js/ga.js\"",
        );
        assert_eq!(
            head_snippet(&config).unwrap(),
            r#"<script async src="/js/ga.js"></script>"#
        );
    }
}
