//! `vitrine image`: print delivery URLs built from the `[images]` section.

use super::args::{ImageCommand, TransformArgs};
use crate::config::SiteConfig;
use crate::image::{
    ImageUrlBuilder, ResponsiveEntry, TransformOptions, is_valid_public_id, preset_names,
    resolve_preset,
};
use anyhow::{Result, bail};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// JSON printed by `image srcset`.
#[derive(Serialize)]
struct SrcsetOutput<'a> {
    entries: &'a [ResponsiveEntry],
    srcset: String,
    sizes: &'a str,
}

pub fn run(config: &SiteConfig, command: &ImageCommand) -> Result<()> {
    println!("{}", render(config, command)?);
    Ok(())
}

/// Produce the text a subcommand prints.
fn render(config: &SiteConfig, command: &ImageCommand) -> Result<String> {
    let images = &config.images;
    let builder = ImageUrlBuilder::new(images);

    match command {
        ImageCommand::Url { id, transform, check } => {
            if *check && !is_valid_public_id(id) {
                bail!("invalid public id `{id}`: allowed characters are A-Z a-z 0-9 _ - / .");
            }
            let options = transform.to_options(&images.presets)?;
            Ok(builder.build(id, &options))
        }
        ImageCommand::Srcset { id, preset, dpr } => {
            let base = match preset {
                Some(name) => lookup_preset(name, &images.presets)?,
                None => TransformOptions::default(),
            };
            let set = builder.responsive(id, &base, *dpr);
            let output = SrcsetOutput {
                entries: &set.entries,
                srcset: set.srcset(),
                sizes: set.sizes,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        ImageCommand::Placeholder { id } => Ok(builder.placeholder(id)),
        ImageCommand::Fallback { width, height } => Ok(builder.fallback(*width, *height)),
        ImageCommand::Presets => Ok(preset_names(&images.presets).join("\n")),
    }
}

fn lookup_preset(
    name: &str,
    custom: &FxHashMap<String, TransformOptions>,
) -> Result<TransformOptions> {
    match resolve_preset(name, custom) {
        Some(options) => Ok(options),
        None => bail!(
            "unknown preset `{name}`, available: {}",
            preset_names(custom).join(", ")
        ),
    }
}

impl TransformArgs {
    /// Preset options (if any) with the individual flags layered on top.
    pub fn to_options(
        &self,
        custom: &FxHashMap<String, TransformOptions>,
    ) -> Result<TransformOptions> {
        let base = match &self.preset {
            Some(name) => lookup_preset(name, custom)?,
            None => TransformOptions::default(),
        };
        let flags = TransformOptions {
            width: self.width,
            height: self.height,
            crop: self.crop,
            gravity: self.gravity,
            quality: self.quality,
            format: self.format,
            dpr: self.dpr,
            raw: self.raw.clone(),
            ..Default::default()
        };
        Ok(base.merge(&flags))
    }
}
