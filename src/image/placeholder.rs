//! Low-quality placeholders and the gray error-state fallback.

use super::ImageUrlBuilder;
use super::options::{Crop, Format, Quality, TransformOptions};

/// Width of progressive-loading placeholders.
pub const PLACEHOLDER_WIDTH: u32 = 40;

/// Blur strength of progressive-loading placeholders.
pub const PLACEHOLDER_BLUR: u32 = 1000;

/// Default fallback dimensions when the caller gives none.
pub const FALLBACK_WIDTH: u32 = 800;

fn placeholder_options() -> TransformOptions {
    TransformOptions {
        width: Some(PLACEHOLDER_WIDTH),
        quality: Some(Quality::AutoLow),
        format: Some(Format::Auto),
        blur: Some(PLACEHOLDER_BLUR),
        ..Default::default()
    }
}

fn fallback_options(width: u32, height: Option<u32>) -> TransformOptions {
    TransformOptions {
        width: Some(width),
        height,
        crop: Some(Crop::Fill),
        quality: Some(Quality::Auto),
        format: Some(Format::Auto),
        ..Default::default()
    }
}

impl ImageUrlBuilder {
    /// Tiny, heavily blurred variant of `public_id` for progressive loading.
    pub fn placeholder(&self, public_id: &str) -> String {
        self.build(public_id, &placeholder_options())
    }

    /// Gray fallback image for error states.
    pub fn fallback(&self, width: Option<u32>, height: Option<u32>) -> String {
        let options = fallback_options(width.unwrap_or(FALLBACK_WIDTH), height);
        self.build(&self.fallback_id, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::ImagesConfig;
    use crate::image::url::tokens;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new(&ImagesConfig::default())
    }

    #[test]
    fn test_placeholder_is_small_and_blurred() {
        for id in ["", "a", "products/shoe-01.png", "weird id?"] {
            let url = builder().placeholder(id);
            let segment = url
                .trim_end_matches(id)
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap();
            let width: u32 = segment
                .split(',')
                .find_map(|t| t.strip_prefix("w_"))
                .and_then(|w| w.parse().ok())
                .unwrap();
            assert!(width <= 50, "{url}");
            assert!(segment.split(',').any(|t| t.starts_with("e_blur:")), "{url}");
        }
    }

    #[test]
    fn test_placeholder_tokens() {
        assert_eq!(
            tokens(&placeholder_options()),
            vec!["w_40", "q_auto:low", "f_auto", "e_blur:1000"]
        );
    }

    #[test]
    fn test_fallback_uses_fixed_id() {
        let url = builder().fallback(Some(300), Some(200));
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/w_300,h_200,c_fill,q_auto,f_auto/placeholders/gray"
        );
    }

    #[test]
    fn test_fallback_default_width() {
        let url = builder().fallback(None, None);
        assert!(url.contains("/w_800,c_fill,q_auto,f_auto/"));
    }

    #[test]
    fn test_fallback_id_from_config() {
        let b = ImageUrlBuilder::new(&ImagesConfig {
            fallback_id: "brand/missing".into(),
            ..ImagesConfig::default()
        });
        assert!(b.fallback(None, None).ends_with("/brand/missing"));
    }
}
