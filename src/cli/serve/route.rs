//! Request URL to endpoint mapping.

use crate::config::SiteConfig;
use crate::image::TransformOptions;
use crate::image::options::{Format, Quality};
use percent_encoding::percent_decode_str;
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// What a request URL asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Sitemap,
    Robots,
    Analytics,
    /// `/img/<preset>/<id>`: redirect to the delivery URL.
    Image {
        preset: String,
        public_id: String,
        overrides: TransformOptions,
    },
    /// `/srcset/<preset>/<id>`: responsive set as JSON.
    Srcset {
        preset: String,
        public_id: String,
        dpr: bool,
    },
    Health,
    BadRequest(String),
    NotFound,
}

impl Route {
    /// Map a raw request target (path plus query) onto a route.
    pub fn parse(target: &str, config: &SiteConfig) -> Self {
        let Ok(url) = Url::parse("http://localhost").and_then(|base| base.join(target)) else {
            return Self::NotFound;
        };
        let path = url.path();

        if path == "/healthz" {
            return Self::Health;
        }
        if path == "/robots.txt" {
            return Self::Robots;
        }
        if matches_file(path, &config.site.sitemap.path) {
            return Self::Sitemap;
        }
        if matches_file(path, &config.site.analytics.path) {
            return Self::Analytics;
        }

        if let Some(rest) = path.strip_prefix("/img/") {
            let Some((preset, public_id)) = split_preset(rest) else {
                return Self::NotFound;
            };
            return match image_overrides(&url) {
                Ok(overrides) => Self::Image {
                    preset,
                    public_id,
                    overrides,
                },
                Err(message) => Self::BadRequest(message),
            };
        }

        if let Some(rest) = path.strip_prefix("/srcset/") {
            let Some((preset, public_id)) = split_preset(rest) else {
                return Self::NotFound;
            };
            let dpr = url
                .query_pairs()
                .any(|(k, v)| k == "dpr" && matches!(v.as_ref(), "true" | "1"));
            return Self::Srcset {
                preset,
                public_id,
                dpr,
            };
        }

        Self::NotFound
    }
}

/// `path` is the URL form of a configured output file.
fn matches_file(path: &str, file: &Path) -> bool {
    let file = file.to_string_lossy();
    let file = file.trim_start_matches("./").trim_start_matches('/');
    path.strip_prefix('/') == Some(file)
}

/// Split `<preset>/<public id>`; both parts must be non-empty.
///
/// The public id stays percent-encoded so it can go straight into a
/// delivery URL path.
fn split_preset(rest: &str) -> Option<(String, String)> {
    let (preset, id) = rest.split_once('/')?;
    let preset = percent_decode_str(preset).decode_utf8().ok()?;
    if preset.is_empty() || id.is_empty() {
        return None;
    }
    Some((preset.into_owned(), id.to_string()))
}

/// Read `w`, `h`, `q` and `f` query parameters.
fn image_overrides(url: &Url) -> Result<TransformOptions, String> {
    let mut options = TransformOptions::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "w" => options.width = Some(parse_param("w", &value)?),
            "h" => options.height = Some(parse_param("h", &value)?),
            "q" => options.quality = Some(parse_param::<Quality>("q", &value)?),
            "f" => options.format = Some(parse_param::<Format>("f", &value)?),
            _ => {}
        }
    }
    Ok(options)
}

fn parse_param<T>(key: &str, value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| format!("`{key}`: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn route(target: &str) -> Route {
        Route::parse(target, &test_parse_config(""))
    }

    #[test]
    fn test_fixed_routes() {
        assert_eq!(route("/healthz"), Route::Health);
        assert_eq!(route("/robots.txt"), Route::Robots);
        assert_eq!(route("/sitemap.xml"), Route::Sitemap);
        assert_eq!(route("/analytics.js"), Route::Analytics);
        assert_eq!(route("/"), Route::NotFound);
        assert_eq!(route("/index.html"), Route::NotFound);
    }

    #[test]
    fn test_configured_paths() {
        let config = test_parse_config(
            "[site.sitemap]\npath = \"seo/map.xml\"\n[site.analytics]\npath = \"js/ga.js\"",
        );
        assert_eq!(Route::parse("/seo/map.xml", &config), Route::Sitemap);
        assert_eq!(Route::parse("/js/ga.js", &config), Route::Analytics);
        assert_eq!(Route::parse("/sitemap.xml", &config), Route::NotFound);
    }

    #[test]
    fn test_image_route_with_query() {
        let Route::Image {
            preset,
            public_id,
            overrides,
        } = route("/img/product/shoes/red%20pair?w=300&q=auto:eco&f=webp&x=1")
        else {
            panic!("expected image route");
        };
        assert_eq!(preset, "product");
        assert_eq!(public_id, "shoes/red%20pair");
        assert_eq!(overrides.width, Some(300));
        assert_eq!(overrides.quality, Some(Quality::AutoEco));
        assert_eq!(overrides.format, Some(Format::Webp));
        assert_eq!(overrides.height, None);
    }

    #[test]
    fn test_encoded_preset_and_reserved_id() {
        let Route::Image { preset, public_id, .. } = route("/img/thumb%6Eail/a%3Fb%23c") else {
            panic!("expected image route");
        };
        assert_eq!(preset, "thumbnail");
        assert_eq!(public_id, "a%3Fb%23c");
    }

    #[test]
    fn test_image_route_bad_param() {
        assert!(
            matches!(route("/img/hero/x?w=wide"), Route::BadRequest(msg) if msg.contains("`w`"))
        );
        assert!(matches!(route("/img/hero/x?f=tiff"), Route::BadRequest(_)));
    }

    #[test]
    fn test_image_route_needs_id() {
        assert_eq!(route("/img/hero"), Route::NotFound);
        assert_eq!(route("/img/hero/"), Route::NotFound);
        assert_eq!(route("/img//x"), Route::NotFound);
    }

    #[test]
    fn test_srcset_route() {
        assert_eq!(
            route("/srcset/gallery/look/1?dpr=true"),
            Route::Srcset {
                preset: "gallery".into(),
                public_id: "look/1".into(),
                dpr: true,
            }
        );
        assert!(matches!(route("/srcset/gallery/look"), Route::Srcset { dpr: false, .. }));
    }
}
