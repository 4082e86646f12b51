//! `[site.analytics]` configuration.
//!
//! The measurement id is usually provided by `PUBLIC_GA_MEASUREMENT_ID`.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Google Analytics (gtag.js) settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site.analytics")]
pub struct AnalyticsConfig {
    /// Measurement id, e.g. "G-XXXXXXXXXX".
    #[config(inline_doc)]
    pub measurement_id: Option<String>,

    /// Output path of the bootstrap script.
    #[config(default = "analytics.js", inline_doc)]
    pub path: PathBuf,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            measurement_id: None,
            path: "analytics.js".into(),
        }
    }
}

impl AnalyticsConfig {
    /// Non-blank measurement id.
    pub fn id(&self) -> Option<&str> {
        self.measurement_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Unusual id formats only produce a hint; GA decides what is valid.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(id) = self.id()
            && !(id.starts_with("G-") || id.starts_with("UA-"))
        {
            diag.hint(
                Self::FIELDS.measurement_id,
                format!("`{id}` does not look like a GA measurement id (G-… or UA-…)"),
            );
        }
    }
}
