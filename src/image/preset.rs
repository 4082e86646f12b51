//! Named option presets for the landing page's image slots.
//!
//! Built-in presets can be overridden (or new ones added) through
//! `[images.presets.<name>]` in the config file.

use super::options::{Crop, Format, Gravity, Quality, TransformOptions};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in preset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Hero,
    Product,
    Logo,
    Thumbnail,
    Background,
    Avatar,
    Gallery,
    Card,
}

impl Preset {
    pub const ALL: [Self; 8] = [
        Self::Hero,
        Self::Product,
        Self::Logo,
        Self::Thumbnail,
        Self::Background,
        Self::Avatar,
        Self::Gallery,
        Self::Card,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Product => "product",
            Self::Logo => "logo",
            Self::Thumbnail => "thumbnail",
            Self::Background => "background",
            Self::Avatar => "avatar",
            Self::Gallery => "gallery",
            Self::Card => "card",
        }
    }

    /// The pre-filled option record for this preset.
    pub fn options(self) -> TransformOptions {
        let auto = TransformOptions {
            format: Some(Format::Auto),
            ..Default::default()
        };
        match self {
            Self::Hero => TransformOptions {
                width: Some(1920),
                height: Some(1080),
                crop: Some(Crop::Fill),
                gravity: Some(Gravity::Auto),
                quality: Some(Quality::AutoGood),
                progressive: true,
                ..auto
            },
            Self::Product => TransformOptions {
                width: Some(800),
                height: Some(800),
                crop: Some(Crop::Pad),
                background: Some("white".into()),
                quality: Some(Quality::AutoGood),
                ..auto
            },
            Self::Logo => TransformOptions {
                width: Some(200),
                crop: Some(Crop::Fit),
                quality: Some(Quality::AutoBest),
                ..auto
            },
            Self::Thumbnail => TransformOptions {
                width: Some(150),
                height: Some(150),
                crop: Some(Crop::Thumb),
                gravity: Some(Gravity::Auto),
                quality: Some(Quality::AutoEco),
                ..auto
            },
            Self::Background => TransformOptions {
                width: Some(1920),
                crop: Some(Crop::Fill),
                quality: Some(Quality::AutoEco),
                progressive: true,
                ..auto
            },
            Self::Avatar => TransformOptions {
                width: Some(96),
                height: Some(96),
                crop: Some(Crop::Thumb),
                gravity: Some(Gravity::Face),
                quality: Some(Quality::Auto),
                ..auto
            },
            Self::Gallery => TransformOptions {
                width: Some(1200),
                height: Some(900),
                crop: Some(Crop::Fill),
                gravity: Some(Gravity::Auto),
                quality: Some(Quality::AutoGood),
                ..auto
            },
            Self::Card => TransformOptions {
                width: Some(600),
                height: Some(400),
                crop: Some(Crop::Fill),
                gravity: Some(Gravity::Auto),
                quality: Some(Quality::Auto),
                ..auto
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown preset `{s}`"))
    }
}

/// Resolve a preset by name: configured presets first, then built-ins.
pub fn resolve_preset(
    name: &str,
    custom: &FxHashMap<String, TransformOptions>,
) -> Option<TransformOptions> {
    custom
        .get(name)
        .cloned()
        .or_else(|| name.parse::<Preset>().ok().map(Preset::options))
}

/// All preset names (built-in and configured), sorted, deduplicated.
pub fn preset_names(custom: &FxHashMap<String, TransformOptions>) -> Vec<String> {
    let mut names: Vec<String> = Preset::ALL
        .iter()
        .map(|p| p.name().to_string())
        .chain(custom.keys().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::url::transform_segment;

    #[test]
    fn test_every_preset_has_a_width_and_auto_format() {
        for preset in Preset::ALL {
            let opts = preset.options();
            assert!(opts.width.is_some(), "{preset}");
            assert_eq!(opts.format, Some(Format::Auto), "{preset}");
        }
    }

    #[test]
    fn test_hero_segment() {
        assert_eq!(
            transform_segment(&Preset::Hero.options()),
            "w_1920,h_1080,c_fill,g_auto,q_auto:good,f_auto,fl_progressive"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!("banner".parse::<Preset>().is_err());
    }

    #[test]
    fn test_custom_preset_overrides_builtin() {
        let mut custom = FxHashMap::default();
        custom.insert(
            "hero".to_string(),
            TransformOptions {
                width: Some(2400),
                ..Default::default()
            },
        );
        custom.insert(
            "banner".to_string(),
            TransformOptions {
                aspect_ratio: Some("4:1".into()),
                ..Default::default()
            },
        );

        assert_eq!(resolve_preset("hero", &custom).unwrap().width, Some(2400));
        assert!(resolve_preset("banner", &custom).is_some());
        assert_eq!(resolve_preset("card", &custom), Some(Preset::Card.options()));
        assert!(resolve_preset("nope", &custom).is_none());
    }

    #[test]
    fn test_preset_names_merged() {
        let mut custom = FxHashMap::default();
        custom.insert("banner".to_string(), TransformOptions::default());
        custom.insert("hero".to_string(), TransformOptions::default());

        let names = preset_names(&custom);
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"banner".to_string()));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
