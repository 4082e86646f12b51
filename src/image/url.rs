//! Transform-to-URL builder.
//!
//! ```text
//! <root>/<cloud>/image/upload/<transform-segment>/<public id>
//!                             └─ w_300,h_200,c_fill,q_auto:good
//! ```
//!
//! Token order is fixed so that identical option records always yield
//! byte-identical URLs (CDN cache keys, test comparison):
//!
//! dimensions → dpr → crop/gravity → quality/format → adjustments → color →
//! effects → artistic effects → border/background → rotation → flags → raw

use super::options::{Strength, TransformOptions};
use crate::config::section::ImagesConfig;

/// Builds delivery URLs for one Cloudinary account.
///
/// The cloud name is resolved once from configuration and never changes
/// for the lifetime of the builder.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    root: String,
    cloud_name: String,
    pub(super) fallback_id: String,
    pub(super) breakpoints: Vec<super::Breakpoint>,
    pub(super) dpr_variants: Vec<f32>,
}

impl ImageUrlBuilder {
    pub fn new(config: &ImagesConfig) -> Self {
        Self {
            root: config.base_url.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            fallback_id: config.fallback_id.clone(),
            breakpoints: config.breakpoints.clone(),
            dpr_variants: config.dpr_variants.clone(),
        }
    }

    /// Build the delivery URL for `public_id`.
    ///
    /// Never fails. The id is not validated (see [`super::is_valid_public_id`])
    /// and an empty id yields a URL ending in `/`.
    pub fn build(&self, public_id: &str, options: &TransformOptions) -> String {
        let segment = transform_segment(options);
        let mut url = String::with_capacity(
            self.root.len() + self.cloud_name.len() + segment.len() + public_id.len() + 24,
        );
        url.push_str(&self.root);
        url.push('/');
        url.push_str(&self.cloud_name);
        url.push_str("/image/upload/");
        if !segment.is_empty() {
            url.push_str(&segment);
            url.push('/');
        }
        url.push_str(public_id);
        url
    }
}

/// Comma-joined transformation tokens; empty when no option is set.
pub fn transform_segment(options: &TransformOptions) -> String {
    tokens(options).join(",")
}

/// Emit one token per populated field, in category order.
pub fn tokens(o: &TransformOptions) -> Vec<String> {
    let mut out = Vec::new();

    // dimensions
    push(&mut out, "w_", o.width);
    push(&mut out, "h_", o.height);
    push(&mut out, "ar_", o.aspect_ratio.as_deref());

    push(&mut out, "dpr_", o.dpr);

    // crop / gravity
    push(&mut out, "c_", o.crop);
    push(&mut out, "g_", o.gravity);

    // quality / format
    push(&mut out, "q_", o.quality);
    push(&mut out, "f_", o.format);

    // adjustments
    push(&mut out, "e_brightness:", o.brightness);
    push(&mut out, "e_contrast:", o.contrast);
    push(&mut out, "e_saturation:", o.saturation);
    push(&mut out, "e_gamma:", o.gamma);
    push(&mut out, "e_vibrance:", o.vibrance);
    push(&mut out, "e_hue:", o.hue);
    push(&mut out, "o_", o.opacity);

    // color
    if o.grayscale {
        out.push("e_grayscale".into());
    }
    push_strength(&mut out, "e_sepia", o.sepia);
    if let Some(colorize) = &o.colorize {
        out.push(format!("e_colorize:{}", colorize.amount));
        out.push(format!("co_{}", colorize.color));
    }

    // effects
    push(&mut out, "e_blur:", o.blur);
    push(&mut out, "e_sharpen:", o.sharpen);
    push(&mut out, "e_pixelate:", o.pixelate);
    push(&mut out, "e_vignette:", o.vignette);
    if o.negate {
        out.push("e_negate".into());
    }

    // artistic effects
    push(&mut out, "e_art:", o.art);
    push_strength(&mut out, "e_cartoonify", o.cartoonify);
    push(&mut out, "e_oil_paint:", o.oil_paint);
    push_strength(&mut out, "e_outline", o.outline);

    // border / background
    push(&mut out, "bo_", o.border.as_deref());
    push(&mut out, "b_", o.background.as_deref());

    push(&mut out, "a_", o.angle);

    // flags
    if o.progressive {
        out.push("fl_progressive".into());
    }
    if o.immutable_cache {
        out.push("fl_immutable_cache".into());
    }
    if o.strip_profile {
        out.push("fl_strip_profile".into());
    }

    if let Some(raw) = o.raw.as_deref().filter(|r| !r.is_empty()) {
        out.push(raw.to_string());
    }

    out
}

#[inline]
fn push<T: std::fmt::Display>(out: &mut Vec<String>, code: &str, value: Option<T>) {
    if let Some(value) = value {
        out.push(format!("{code}{value}"));
    }
}

#[inline]
fn push_strength(out: &mut Vec<String>, code: &str, value: Option<Strength>) {
    match value {
        Some(Strength::Default) => out.push(code.to_string()),
        Some(Strength::Level(v)) => out.push(format!("{code}:{v}")),
        None => {}
    }
}
