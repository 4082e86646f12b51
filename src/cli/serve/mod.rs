//! HTTP server for site metadata and image endpoints.
//!
//! Everything is rendered per request from the loaded config; nothing is
//! read from the output directory.

mod lifecycle;
mod response;
mod route;

pub use lifecycle::setup_shutdown_handler;

use crate::generator::{analytics, robots, sitemap};
use crate::image::{ImageUrlBuilder, preset_names, resolve_preset};
use crate::utils::mime::types::{JAVASCRIPT, JSON, PLAIN, XML};
use crate::{config::SiteConfig, debug, log};
use anyhow::{Context, Result};
use route::Route;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Request handler threads.
const WORKER_THREADS: usize = 4;

/// Outcome of a request, before it is written to the socket.
#[derive(Debug, PartialEq)]
enum Reply {
    Body {
        status: u16,
        content_type: &'static str,
        body: Vec<u8>,
    },
    Redirect(String),
    BadRequest(String),
    MethodNotAllowed,
    NotFound,
}

impl Reply {
    fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self::Body {
            status: 200,
            content_type,
            body: body.into(),
        }
    }

    fn send(self, request: Request) -> Result<()> {
        match self {
            Self::Body {
                status,
                content_type,
                body,
            } => response::respond(request, status, content_type, body),
            Self::Redirect(location) => response::respond_redirect(request, &location),
            Self::BadRequest(message) => response::respond_bad_request(request, &message),
            Self::MethodNotAllowed => response::respond_method_not_allowed(request),
            Self::NotFound => response::respond_not_found(request),
        }
    }
}

/// Bind, then answer requests until Ctrl+C.
pub fn serve_site(config: Arc<SiteConfig>) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    debug!("serve"; "presets: {}", preset_names(&config.images.presets).join(", "));

    run_request_loop(&server, config)
}

fn run_request_loop(server: &Server, config: Arc<SiteConfig>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKER_THREADS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        if lifecycle::is_shutdown() {
            break;
        }
        let config = Arc::clone(&config);
        pool.spawn(move || {
            let url = request.url().to_string();
            let reply = reply_for(request.method(), &url, &config);
            debug!("serve"; "{} {}", request.method(), url);
            if let Err(e) = reply.send(request) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Decide how to answer `method target`.
fn reply_for(method: &Method, target: &str, config: &SiteConfig) -> Reply {
    if !matches!(method, Method::Get | Method::Head) {
        return Reply::MethodNotAllowed;
    }

    match Route::parse(target, config) {
        Route::Health => Reply::ok(PLAIN, "ok"),
        Route::Robots => match robots::render_robots(config) {
            Some(body) => Reply::ok(PLAIN, body),
            None => Reply::NotFound,
        },
        Route::Sitemap => match sitemap::render_sitemap(config) {
            Some(body) => Reply::ok(XML, body),
            None => Reply::NotFound,
        },
        Route::Analytics => match analytics::render_script(config) {
            Some(body) => Reply::ok(JAVASCRIPT, body),
            None => Reply::NotFound,
        },
        Route::Image {
            preset,
            public_id,
            overrides,
        } => match resolve_preset(&preset, &config.images.presets) {
            Some(base) => {
                let builder = ImageUrlBuilder::new(&config.images);
                Reply::Redirect(builder.build(&public_id, &base.merge(&overrides)))
            }
            None => Reply::NotFound,
        },
        Route::Srcset {
            preset,
            public_id,
            dpr,
        } => match resolve_preset(&preset, &config.images.presets) {
            Some(base) => {
                let set = ImageUrlBuilder::new(&config.images).responsive(&public_id, &base, dpr);
                let json = serde_json::json!({
                    "entries": set.entries,
                    "srcset": set.srcset(),
                    "sizes": set.sizes,
                });
                Reply::ok(JSON, json.to_string())
            }
            None => Reply::NotFound,
        },
        Route::BadRequest(message) => Reply::BadRequest(message),
        Route::NotFound => Reply::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn get(target: &str, config: &SiteConfig) -> Reply {
        reply_for(&Method::Get, target, config)
    }

    fn body_of(reply: Reply) -> String {
        match reply {
            Reply::Body { status: 200, body, .. } => String::from_utf8(body).unwrap(),
            other => panic!("expected 200 body, got {other:?}"),
        }
    }

    #[test]
    fn test_method_not_allowed() {
        let config = test_parse_config("");
        assert_eq!(reply_for(&Method::Post, "/healthz", &config), Reply::MethodNotAllowed);
        assert_eq!(reply_for(&Method::Delete, "/robots.txt", &config), Reply::MethodNotAllowed);
        assert_eq!(reply_for(&Method::Head, "/healthz", &config), Reply::ok(PLAIN, "ok"));
    }

    #[test]
    fn test_metadata_routes() {
        let config = test_parse_config(
            "url = \"https://acme.example\"\n[site.analytics]\nmeasurement_id = \"G-ABC123\"",
        );
        assert!(body_of(get("/sitemap.xml", &config)).contains("<urlset"));
        assert!(body_of(get("/robots.txt", &config)).starts_with("User-agent: *"));
        assert!(body_of(get("/analytics.js", &config)).contains("G-ABC123"));
    }

    #[test]
    fn test_degraded_routes_are_not_found() {
        let config = test_parse_config("");
        assert_eq!(get("/sitemap.xml", &config), Reply::NotFound);
        assert_eq!(get("/analytics.js", &config), Reply::NotFound);
        assert_eq!(get("/nope", &config), Reply::NotFound);
    }

    #[test]
    fn test_image_redirect() {
        let config = test_parse_config("[images]\ncloud_name = \"acme\"");
        let Reply::Redirect(location) = get("/img/thumbnail/shoes/red?w=120", &config) else {
            panic!("expected redirect");
        };
        assert!(location.starts_with("https://res.cloudinary.com/acme/image/upload/w_120,"));
        assert!(location.ends_with("/shoes/red"));
    }

    #[test]
    fn test_image_redirect_keeps_id_encoded() {
        let config = test_parse_config("[images]\ncloud_name = \"acme\"");
        let Reply::Redirect(location) = get("/img/hero/summer%20sale/a%3Fb", &config) else {
            panic!("expected redirect");
        };
        assert!(location.ends_with("/summer%20sale/a%3Fb"));
        assert!(!location.contains('?'));
        assert!(!location.contains(' '));
    }

    #[test]
    fn test_unknown_preset_is_not_found() {
        let config = test_parse_config("");
        assert_eq!(get("/img/banner/shoes/red", &config), Reply::NotFound);
        assert_eq!(get("/srcset/banner/shoes/red", &config), Reply::NotFound);
    }

    #[test]
    fn test_bad_query_is_bad_request() {
        let config = test_parse_config("");
        assert!(matches!(get("/img/hero/x?q=best", &config), Reply::BadRequest(_)));
    }

    #[test]
    fn test_srcset_json() {
        let config = test_parse_config("");
        let body = body_of(get("/srcset/gallery/look?dpr=true", &config));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let breakpoints = config.images.breakpoints.len();
        let dprs = config.images.dpr_variants.len();
        assert_eq!(json["entries"].as_array().unwrap().len(), breakpoints * dprs);
        assert!(json["srcset"].as_str().unwrap().contains("w,"));
    }
}
