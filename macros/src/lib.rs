//! Proc macros for vitrine.
//!
//! # Config derive macro
//!
//! Generates field path accessors and a commented TOML template.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "images")]
//! /// Cloudinary delivery settings.
//! pub struct ImagesConfig {
//!     /// Cloudinary cloud name.
//!     #[config(default = "demo", inline_doc)]
//!     pub cloud_name: String,
//!
//!     /// Resolved at runtime.
//!     #[config(skip)]
//!     pub internal: String,
//! }
//!
//! // Generates:
//! // - ImagesConfig::FIELDS.cloud_name -> FieldPath("images.cloud_name")
//! // - ImagesConfig::template() -> TOML string with comments
//! // - ImagesConfig::template_with_header() -> with [section] header
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path
//!
//! Field-level:
//! - `#[config(skip)]` - Skip from FIELDS and template
//! - `#[config(hidden)]` - Keep in FIELDS, hide from template
//! - `#[config(name = "x")]` - Custom TOML field name
//! - `#[config(default = "x")]` - Default value in template
//! - `#[config(inline_doc)]` - Render a single-line doc as trailing comment
//!
//! Without `section`, the section is inferred from the struct name:
//! `ServeConfig` → `serve`, `SiteInfoConfig` → `site_info`.

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
