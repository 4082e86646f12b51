//! Shopify storefront and admin clients.
//!
//! | Module       | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `storefront` | GraphQL: products, carts                          |
//! | `admin`      | REST: orders, customers, fulfillments             |
//! | `types`      | Payload structs                                   |
//! | `error`      | `CommerceError`                                   |
//!
//! Every call is attempted exactly once. The plain methods log failures and
//! return `None` or an empty list; the `try_*` methods return the error.
//! A client only exists when its domain and token are configured.

mod admin;
mod error;
mod storefront;
pub mod types;

pub use admin::{AdminClient, DEFAULT_LIMIT};
pub use error::CommerceError;
pub use storefront::{DEFAULT_PRODUCT_COUNT, StorefrontClient};

use crate::log;
use serde::de::DeserializeOwned;

/// Send a request and decode a successful JSON body.
async fn read_json<T: DeserializeOwned>(
    url: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, CommerceError> {
    let http_err = |source| CommerceError::Http {
        url: url.to_string(),
        source,
    };

    let response = request.send().await.map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CommerceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(http_err)?;
    serde_json::from_str(&body).map_err(|source| CommerceError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Log a failed call and turn it into `None`.
fn swallow<T>(operation: &str, result: Result<T, CommerceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log!("error"; "{operation} failed: {}", e.chain());
            None
        }
    }
}

/// Local HTTP stub standing in for the Shopify endpoints.
#[cfg(test)]
pub(crate) mod stub {
    use std::io::Read;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Header, Response, Server};

    /// A request as the stub saw it.
    #[derive(Debug)]
    pub struct Captured {
        pub method: String,
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl Captured {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    pub struct Stub {
        pub base_url: String,
        rx: mpsc::Receiver<Captured>,
    }

    impl Stub {
        /// The single request the stub answered.
        pub fn captured(&self) -> Captured {
            self.rx.recv_timeout(Duration::from_secs(5)).unwrap()
        }
    }

    /// Answer exactly one request with `status` and `body`.
    pub fn serve_once(status: u16, body: &str) -> Stub {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let body = body.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok(mut request) = server.recv() else { return };
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let captured = Captured {
                method: request.method().as_str().to_string(),
                url: request.url().to_string(),
                headers: request
                    .headers()
                    .iter()
                    .map(|h| (h.field.as_str().as_str().to_string(), h.value.as_str().to_string()))
                    .collect(),
                body: received,
            };
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
            let _ = request.respond(response);
            let _ = tx.send(captured);
        });

        Stub {
            base_url: format!("http://{addr}"),
            rx,
        }
    }
}
