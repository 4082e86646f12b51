//! `[build]` section configuration.

use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output settings for `vitrine build`.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "build")]
pub struct BuildConfig {
    /// Directory that receives sitemap.xml, robots.txt and the analytics script.
    #[config(default = "dist")]
    pub output: PathBuf,

    /// Minify generated XML.
    #[config(default = "false", inline_doc)]
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            minify: false,
        }
    }
}
