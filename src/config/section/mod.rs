//! Configuration section definitions.
//!
//! Each module corresponds to a section in `vitrine.toml`:
//!
//! | Module    | TOML Section   | Purpose                                 |
//! |-----------|----------------|-----------------------------------------|
//! | `build`   | `[build]`      | Output directory, minification          |
//! | `images`  | `[images]`     | Cloudinary account, breakpoints, presets|
//! | `serve`   | `[serve]`      | Endpoint server                         |
//! | `shopify` | `[shopify]`    | Store domain, tokens, API version       |
//! | `site`    | `[site]`       | Info, sitemap, robots, analytics        |

mod build;
mod images;
mod serve;
mod shopify;
pub mod site;

pub use build::BuildConfig;
pub use images::ImagesConfig;
pub use serve::ServeConfig;
pub use shopify::ShopifyConfig;
pub use site::SiteSectionConfig;
