//! Responsive image sets (`srcset` / `sizes`).

use super::ImageUrlBuilder;
use super::options::{Crop, Dpr, Quality, TransformOptions};
use serde::{Deserialize, Serialize};

/// Viewport-to-slot hint emitted alongside every set.
///
/// Fixed literal: it is not derived from the configured breakpoints.
pub const SIZES_HINT: &str = "(max-width: 640px) 100vw, (max-width: 1024px) 50vw, 33vw";

/// Density multipliers used when DPR variants are requested.
pub const DEFAULT_DPR_VARIANTS: [f32; 3] = [1.0, 1.5, 2.0];

/// A named target rendering width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub width: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// Default tiers: mobile, tablet, desktop, large.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("mobile", 400),
            Self::new("tablet", 800),
            Self::new("desktop", 1200),
            Self::new("large", 1600),
        ]
    }
}

/// One candidate in a `srcset`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveEntry {
    pub url: String,
    /// Width descriptor (`<n>w`), already multiplied by the DPR.
    pub width: u32,
    pub breakpoint: String,
    pub dpr: f32,
}

/// Generated candidates plus the static `sizes` hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveSet {
    pub entries: Vec<ResponsiveEntry>,
    pub sizes: &'static str,
}

impl ResponsiveSet {
    /// Render the `srcset` attribute value.
    pub fn srcset(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}w", e.url, e.width))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ImageUrlBuilder {
    /// Build one URL per breakpoint (and per DPR variant when `with_dpr`).
    ///
    /// Width is overridden per tier; crop falls back to `fill` and quality
    /// to `auto` when the base options leave them unset. Entries follow
    /// the breakpoint order, DPR variants nested inside each tier.
    pub fn responsive(
        &self,
        public_id: &str,
        base: &TransformOptions,
        with_dpr: bool,
    ) -> ResponsiveSet {
        let mut base = base.clone();
        base.crop.get_or_insert(Crop::Fill);
        base.quality.get_or_insert(Quality::Auto);

        let dprs: &[f32] = if with_dpr { &self.dpr_variants } else { &[1.0] };

        let mut entries = Vec::with_capacity(self.breakpoints.len() * dprs.len());
        for bp in &self.breakpoints {
            for &dpr in dprs {
                let mut opts = base.clone();
                opts.width = Some(bp.width);
                let width = if dpr == 1.0 {
                    bp.width
                } else {
                    opts.dpr = Some(Dpr::Value(dpr));
                    (bp.width as f32 * dpr).round() as u32
                };
                entries.push(ResponsiveEntry {
                    url: self.build(public_id, &opts),
                    width,
                    breakpoint: bp.name.clone(),
                    dpr,
                });
            }
        }

        ResponsiveSet {
            entries,
            sizes: SIZES_HINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::ImagesConfig;
    use crate::image::options::Format;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new(&ImagesConfig {
            cloud_name: "acme".into(),
            ..ImagesConfig::default()
        })
    }

    #[test]
    fn test_four_breakpoints_ascending() {
        let set = builder().responsive("hero/main", &TransformOptions::default(), false);

        assert_eq!(set.entries.len(), 4);
        let widths: Vec<u32> = set.entries.iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![400, 800, 1200, 1600]);
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_defaults_crop_and_quality() {
        let set = builder().responsive("x", &TransformOptions::default(), false);
        assert_eq!(
            set.entries[0].url,
            "https://res.cloudinary.com/acme/image/upload/w_400,c_fill,q_auto/x"
        );
    }

    #[test]
    fn test_keeps_explicit_crop_and_quality() {
        let base = TransformOptions {
            crop: Some(Crop::Fit),
            quality: Some(Quality::AutoBest),
            format: Some(Format::Webp),
            width: Some(9999),
            ..Default::default()
        };
        let set = builder().responsive("x", &base, false);
        assert!(set.entries[1].url.contains("/w_800,c_fit,q_auto:best,f_webp/"));
        assert!(!set.entries.iter().any(|e| e.url.contains("w_9999")));
    }

    #[test]
    fn test_dpr_variants_multiply() {
        let set = builder().responsive("x", &TransformOptions::default(), true);

        assert_eq!(set.entries.len(), 12);
        let first_tier: Vec<u32> = set.entries[..3].iter().map(|e| e.width).collect();
        assert_eq!(first_tier, vec![400, 600, 800]);

        // dpr 1 has no dpr token, others do
        assert!(!set.entries[0].url.contains("dpr_"));
        assert!(set.entries[1].url.contains("w_400,dpr_1.5,"));
        assert!(set.entries[2].url.contains("w_400,dpr_2.0,"));

        // tier order is preserved
        let tiers: Vec<&str> = set
            .entries
            .iter()
            .step_by(3)
            .map(|e| e.breakpoint.as_str())
            .collect();
        assert_eq!(tiers, vec!["mobile", "tablet", "desktop", "large"]);
    }

    #[test]
    fn test_sizes_hint_is_fixed() {
        let mut config = ImagesConfig::default();
        config.breakpoints = vec![Breakpoint::new("tiny", 120)];
        let set =
            ImageUrlBuilder::new(&config).responsive("x", &TransformOptions::default(), false);

        assert_eq!(set.entries.len(), 1);
        assert_eq!(set.sizes, SIZES_HINT);
    }

    #[test]
    fn test_srcset_format() {
        let mut config = ImagesConfig::default();
        config.cloud_name = "acme".into();
        config.breakpoints = vec![Breakpoint::new("a", 100), Breakpoint::new("b", 200)];
        let set =
            ImageUrlBuilder::new(&config).responsive("p", &TransformOptions::default(), false);

        assert_eq!(
            set.srcset(),
            "https://res.cloudinary.com/acme/image/upload/w_100,c_fill,q_auto/p 100w, \
             https://res.cloudinary.com/acme/image/upload/w_200,c_fill,q_auto/p 200w"
        );
    }
}
