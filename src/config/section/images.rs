//! `[images]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [images]
//! cloud_name = "acme"
//! fallback_id = "placeholders/gray"
//! breakpoints = [
//!     { name = "mobile", width = 400 },
//!     { name = "desktop", width = 1200 },
//! ]
//! dpr_variants = [1.0, 2.0]
//!
//! [images.presets.banner]
//! width = 1600
//! aspect_ratio = "4:1"
//! crop = "fill"
//! ```
//!
//! `CLOUDINARY_CLOUD_NAME` (or `PUBLIC_CLOUDINARY_CLOUD_NAME`) overrides
//! `cloud_name` at startup.

use crate::config::ConfigDiagnostics;
use crate::image::{Breakpoint, DEFAULT_DPR_VARIANTS, TransformOptions};
use macros::Config;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cloud name used when neither config nor environment provide one.
pub const FALLBACK_CLOUD_NAME: &str = "demo";

/// Cloudinary delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "images")]
pub struct ImagesConfig {
    /// Cloudinary cloud (account) name.
    #[config(default = "demo", inline_doc)]
    pub cloud_name: String,

    /// Delivery root.
    #[config(default = "https://res.cloudinary.com", inline_doc)]
    pub base_url: String,

    /// Public id of the gray image served in error states.
    #[config(default = "placeholders/gray", inline_doc)]
    pub fallback_id: String,

    /// Responsive tiers, ascending.
    #[config(hidden)]
    pub breakpoints: Vec<Breakpoint>,

    /// Density multipliers for `srcset` DPR variants.
    #[config(default = "[1.0, 1.5, 2.0]", inline_doc)]
    pub dpr_variants: Vec<f32>,

    /// Named option records, overriding built-in presets of the same name.
    #[config(skip)]
    pub presets: FxHashMap<String, TransformOptions>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cloud_name: FALLBACK_CLOUD_NAME.into(),
            base_url: "https://res.cloudinary.com".into(),
            fallback_id: "placeholders/gray".into(),
            breakpoints: Breakpoint::defaults(),
            dpr_variants: DEFAULT_DPR_VARIANTS.to_vec(),
            presets: FxHashMap::default(),
        }
    }
}

impl ImagesConfig {
    /// Validate image settings.
    ///
    /// # Checks
    /// - `cloud_name` is not blank
    /// - `base_url` is an absolute http(s) URL
    /// - breakpoints are non-empty, positive and strictly ascending
    /// - DPR variants are positive
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.cloud_name.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.cloud_name,
                "cloud name is empty",
                format!("remove the key to fall back to \"{FALLBACK_CLOUD_NAME}\""),
            );
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => diag.error_with_hint(
                Self::FIELDS.base_url,
                format!("invalid delivery root `{}`", self.base_url),
                "use format like https://res.cloudinary.com",
            ),
        }

        if self.breakpoints.is_empty() {
            diag.error(Self::FIELDS.breakpoints, "at least one breakpoint is required");
        }
        if self.breakpoints.iter().any(|bp| bp.width == 0) {
            diag.error(Self::FIELDS.breakpoints, "breakpoint width must be positive");
        }
        if !self.breakpoints.windows(2).all(|w| w[0].width < w[1].width) {
            diag.error_with_hint(
                Self::FIELDS.breakpoints,
                "breakpoints are not in ascending width order",
                "list tiers from narrowest to widest",
            );
        }

        if self.dpr_variants.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            diag.error(Self::FIELDS.dpr_variants, "DPR variants must be positive");
        }
    }
}
