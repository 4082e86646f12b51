//! Type-safe config field path.

use owo_colors::{OwoColorize, Stream};
use std::fmt;

/// Dotted path of a config key, e.g. `images.cloud_name`.
///
/// Generated by `#[derive(Config)]` as `Section::FIELDS.<field>` so that
/// diagnostics can never reference a key that does not exist.
///
/// ```ignore
/// diag.error(ImagesConfig::FIELDS.cloud_name, "cloud name is empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = format!("`{}`", self.0);
        write!(f, "{}", path.if_supports_color(Stream::Stderr, |p| p.bright_blue()))
    }
}
