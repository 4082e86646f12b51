//! Cloudinary image delivery URLs.
//!
//! | Module        | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `options`     | `TransformOptions` and its value enums         |
//! | `url`         | `ImageUrlBuilder` and token emission           |
//! | `responsive`  | Breakpoint/DPR `srcset` generation             |
//! | `placeholder` | Blurred placeholders and gray fallback         |
//! | `preset`      | Named option records (hero, product, ...)      |
//! | `validate`    | Public id format check                         |
//!
//! Everything here is pure and synchronous; nothing can fail.

pub mod options;
mod placeholder;
pub mod preset;
mod responsive;
mod url;
mod validate;

pub use options::TransformOptions;
pub use preset::{preset_names, resolve_preset};
pub use responsive::{Breakpoint, DEFAULT_DPR_VARIANTS, ResponsiveEntry};
pub use url::ImageUrlBuilder;
pub use validate::is_valid_public_id;
