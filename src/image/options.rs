//! Transformation option record and its value types.
//!
//! Every field is optional and carries no default of its own. Values are
//! not range-checked here: the CDN is the final arbiter of what it accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized token for one of the enumerated option types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct ParseTokenError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseTokenError {
    fn new(kind: &'static str, value: &str, expected: String) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Declare a closed enum whose variants map 1:1 onto CDN tokens.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseTokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(ParseTokenError::new(
                        $kind,
                        s,
                        Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", "),
                    )),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseTokenError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_string()
            }
        }
    };
}

token_enum! {
    /// How the image is fitted into the requested dimensions.
    Crop("crop mode") {
        Fill => "fill",
        Fit => "fit",
        Scale => "scale",
        Crop => "crop",
        Thumb => "thumb",
        Pad => "pad",
        /// Like `fit`, but never upscales.
        Limit => "limit",
        /// Like `fit`, but never downscales.
        MinimumFit => "mfit",
        /// Like `fill`, but never upscales.
        LimitFill => "lfill",
        /// Like `pad`, but never upscales.
        LimitPad => "lpad",
        /// Like `pad`, but never downscales.
        MinimumPad => "mpad",
        FillPad => "fill_pad",
    }
}

token_enum! {
    /// Focal point used by cropping modes.
    Gravity("gravity") {
        Auto => "auto",
        AutoFace => "auto:face",
        AutoFaces => "auto:faces",
        Face => "face",
        Faces => "faces",
        Center => "center",
        North => "north",
        NorthEast => "north_east",
        East => "east",
        SouthEast => "south_east",
        South => "south",
        SouthWest => "south_west",
        West => "west",
        NorthWest => "north_west",
        XyCenter => "xy_center",
    }
}

token_enum! {
    /// Delivery format. `auto` lets the CDN negotiate with the browser.
    Format("format") {
        Auto => "auto",
        Webp => "webp",
        Avif => "avif",
        Jpg => "jpg",
        Png => "png",
        Gif => "gif",
    }
}

token_enum! {
    /// Named artistic filters (`e_art:<name>`).
    ArtFilter("art filter") {
        AlDente => "al_dente",
        Athena => "athena",
        Audrey => "audrey",
        Aurora => "aurora",
        Daguerre => "daguerre",
        Eucalyptus => "eucalyptus",
        Fes => "fes",
        Frost => "frost",
        Hairspray => "hairspray",
        Hokusai => "hokusai",
        Incognito => "incognito",
        Linen => "linen",
        Peacock => "peacock",
        Primavera => "primavera",
        Quartz => "quartz",
        RedRock => "red_rock",
        Refresh => "refresh",
        Sizzle => "sizzle",
        Sonnet => "sonnet",
        Ukulele => "ukulele",
        Zorro => "zorro",
    }
}

// ============================================================================
// Quality
// ============================================================================

/// Compression quality: an automatic tier or an explicit level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NumberOrToken", into = "String")]
pub enum Quality {
    Auto,
    AutoBest,
    AutoGood,
    AutoEco,
    AutoLow,
    /// Explicit level, nominally 1-100. Passed through unchecked.
    Level(u32),
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::AutoBest => f.write_str("auto:best"),
            Self::AutoGood => f.write_str("auto:good"),
            Self::AutoEco => f.write_str("auto:eco"),
            Self::AutoLow => f.write_str("auto:low"),
            Self::Level(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Quality {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "auto:best" => Ok(Self::AutoBest),
            "auto:good" => Ok(Self::AutoGood),
            "auto:eco" => Ok(Self::AutoEco),
            "auto:low" => Ok(Self::AutoLow),
            _ => s.parse().map(Self::Level).map_err(|_| {
                ParseTokenError::new(
                    "quality",
                    s,
                    "auto, auto:best, auto:good, auto:eco, auto:low, 1-100".into(),
                )
            }),
        }
    }
}

impl TryFrom<NumberOrToken> for Quality {
    type Error = ParseTokenError;

    fn try_from(v: NumberOrToken) -> Result<Self, Self::Error> {
        match v {
            NumberOrToken::Number(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Self::Level(n as u32)),
            NumberOrToken::Number(n) => n.to_string().parse(),
            NumberOrToken::Token(s) => s.parse(),
        }
    }
}

impl From<Quality> for String {
    fn from(v: Quality) -> Self {
        v.to_string()
    }
}

// ============================================================================
// Device pixel ratio
// ============================================================================

/// Device pixel ratio multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NumberOrToken", into = "String")]
pub enum Dpr {
    Auto,
    Value(f32),
}

impl fmt::Display for Dpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            // The CDN expects at least one decimal: dpr_2.0, dpr_1.5
            Self::Value(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Dpr {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        s.parse()
            .map(Self::Value)
            .map_err(|_| ParseTokenError::new("dpr", s, "auto, or a decimal like 1.5".into()))
    }
}

impl TryFrom<NumberOrToken> for Dpr {
    type Error = ParseTokenError;

    fn try_from(v: NumberOrToken) -> Result<Self, Self::Error> {
        match v {
            NumberOrToken::Number(n) => Ok(Self::Value(n as f32)),
            NumberOrToken::Token(s) => s.parse(),
        }
    }
}

impl From<Dpr> for String {
    fn from(v: Dpr) -> Self {
        v.to_string()
    }
}

/// Config-side representation accepting `quality = 80` and `quality = "auto"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrToken {
    Number(f64),
    Token(String),
}

// ============================================================================
// Strength
// ============================================================================

/// Effect that can be enabled bare (`e_sepia`) or with a level (`e_sepia:50`).
///
/// In TOML: `sepia = true` or `sepia = 50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FlagOrLevel", into = "FlagOrLevel")]
pub enum Strength {
    Default,
    Level(i32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FlagOrLevel {
    Flag(bool),
    Level(i32),
}

impl TryFrom<FlagOrLevel> for Strength {
    type Error = String;

    fn try_from(v: FlagOrLevel) -> Result<Self, Self::Error> {
        match v {
            FlagOrLevel::Flag(true) => Ok(Self::Default),
            FlagOrLevel::Flag(false) => {
                Err("use `true` or a level; omit the key to disable".into())
            }
            FlagOrLevel::Level(n) => Ok(Self::Level(n)),
        }
    }
}

impl From<Strength> for FlagOrLevel {
    fn from(v: Strength) -> Self {
        match v {
            Strength::Default => Self::Flag(true),
            Strength::Level(n) => Self::Level(n),
        }
    }
}

/// Tint toward a color: `e_colorize:<amount>,co_<color>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colorize {
    pub amount: i32,
    pub color: String,
}

// ============================================================================
// TransformOptions
// ============================================================================

/// A requested image transformation.
///
/// Purely descriptive: built, handed to the URL builder, discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    // geometry
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<String>,

    // fitting
    pub crop: Option<Crop>,
    pub gravity: Option<Gravity>,

    // encoding
    pub quality: Option<Quality>,
    pub format: Option<Format>,
    pub dpr: Option<Dpr>,

    // adjustments
    pub brightness: Option<i32>,
    pub contrast: Option<i32>,
    pub saturation: Option<i32>,
    pub gamma: Option<i32>,
    pub vibrance: Option<i32>,
    pub hue: Option<i32>,
    pub opacity: Option<u32>,

    // color
    pub grayscale: bool,
    pub sepia: Option<Strength>,
    pub colorize: Option<Colorize>,

    // effects
    pub blur: Option<u32>,
    pub sharpen: Option<u32>,
    pub pixelate: Option<u32>,
    pub vignette: Option<u32>,
    pub negate: bool,

    // artistic effects
    pub art: Option<ArtFilter>,
    pub cartoonify: Option<Strength>,
    pub oil_paint: Option<u32>,
    pub outline: Option<Strength>,

    // decoration
    pub border: Option<String>,
    pub background: Option<String>,
    pub angle: Option<i32>,

    // delivery flags
    pub progressive: bool,
    pub immutable_cache: bool,
    pub strip_profile: bool,

    /// Raw transformation appended verbatim as the last token.
    ///
    /// Unvalidated and order-sensitive: the caller must make sure it
    /// composes with the tokens emitted before it.
    pub raw: Option<String>,
}

impl TransformOptions {
    /// Overlay `other` on top of `self`: fields set in `other` win,
    /// toggles are combined.
    pub fn merge(mut self, other: &Self) -> Self {
        macro_rules! take {
            ($($field:ident),+) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })+
            };
        }
        macro_rules! either {
            ($($field:ident),+) => {
                $(self.$field |= other.$field;)+
            };
        }

        take!(
            width, height, aspect_ratio, crop, gravity, quality, format, dpr, brightness,
            contrast, saturation, gamma, vibrance, hue, opacity, sepia, colorize, blur, sharpen,
            pixelate, vignette, art, cartoonify, oil_paint, outline, border, background, angle,
            raw
        );
        either!(grayscale, negate, progressive, immutable_cache, strip_profile);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_enum_roundtrip_strings() {
        assert_eq!("fill_pad".parse::<Crop>().unwrap(), Crop::FillPad);
        assert_eq!(Gravity::AutoFace.to_string(), "auto:face");
        assert_eq!(Format::Avif.as_str(), "avif");
        assert_eq!("red_rock".parse::<ArtFilter>().unwrap(), ArtFilter::RedRock);
    }

    #[test]
    fn test_token_enum_error_lists_choices() {
        let err = "stretch".parse::<Crop>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("crop mode"));
        assert!(msg.contains("`stretch`"));
        assert!(msg.contains("fill, fit"));
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("auto:good".parse::<Quality>().unwrap(), Quality::AutoGood);
        assert_eq!("75".parse::<Quality>().unwrap(), Quality::Level(75));
        assert_eq!("150".parse::<Quality>().unwrap(), Quality::Level(150));
        assert!("auto:great".parse::<Quality>().is_err());
    }

    #[test]
    fn test_dpr_display() {
        assert_eq!(Dpr::Value(2.0).to_string(), "2.0");
        assert_eq!(Dpr::Value(1.5).to_string(), "1.5");
        assert_eq!(Dpr::Auto.to_string(), "auto");
        assert_eq!("1.5".parse::<Dpr>().unwrap(), Dpr::Value(1.5));
    }

    #[test]
    fn test_options_from_toml() {
        let opts: TransformOptions = toml::from_str(
            r#"
            width = 600
            crop = "fill"
            gravity = "auto:faces"
            quality = 80
            format = "auto"
            dpr = "auto"
            sepia = true
            cartoonify = 40
            "#,
        )
        .unwrap();

        assert_eq!(opts.width, Some(600));
        assert_eq!(opts.crop, Some(Crop::Fill));
        assert_eq!(opts.gravity, Some(Gravity::AutoFaces));
        assert_eq!(opts.quality, Some(Quality::Level(80)));
        assert_eq!(opts.dpr, Some(Dpr::Auto));
        assert_eq!(opts.sepia, Some(Strength::Default));
        assert_eq!(opts.cartoonify, Some(Strength::Level(40)));
    }

    #[test]
    fn test_options_quality_token_from_toml() {
        let opts: TransformOptions = toml::from_str(r#"quality = "auto:eco""#).unwrap();
        assert_eq!(opts.quality, Some(Quality::AutoEco));
    }

    #[test]
    fn test_options_reject_unknown_field() {
        let result: Result<TransformOptions, _> = toml::from_str("widht = 100");
        assert!(result.is_err());
    }

    #[test]
    fn test_options_reject_false_strength() {
        let result: Result<TransformOptions, _> = toml::from_str("sepia = false");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_overrides_and_keeps() {
        let base = TransformOptions {
            width: Some(800),
            crop: Some(Crop::Fill),
            progressive: true,
            ..Default::default()
        };
        let overrides = TransformOptions {
            width: Some(300),
            quality: Some(Quality::Auto),
            ..Default::default()
        };
        let merged = base.merge(&overrides);

        assert_eq!(merged.width, Some(300));
        assert_eq!(merged.crop, Some(Crop::Fill));
        assert_eq!(merged.quality, Some(Quality::Auto));
        assert!(merged.progressive);
    }
}
