//! Configuration management for `vitrine.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── images     # [images]
//! │   ├── serve      # [serve]
//! │   ├── shopify    # [shopify]
//! │   └── site/      # [site.info], [site.sitemap], [site.robots], [site.analytics]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sources, lowest to highest precedence
//!
//! 1. Built-in defaults (a missing config file is not an error)
//! 2. `vitrine.toml`
//! 3. Environment variables (see [`SiteConfig::apply_env`])
//! 4. CLI flags

pub mod section;
mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::site::{AnalyticsConfig, SiteInfoConfig, SitemapPage};
pub use section::{BuildConfig, ImagesConfig, ServeConfig, ShopifyConfig, SiteSectionConfig};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Landing page metadata, sitemap, robots, analytics
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Cloudinary delivery settings
    #[serde(default)]
    pub images: ImagesConfig,

    /// Shopify store settings
    #[serde(default)]
    pub shopify: ShopifyConfig,

    /// Endpoint server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Build output settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// When none is found the defaults are used (degraded mode).
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            if !cli.is_init() {
                debug!("config"; "{} not found, using defaults", cli.config.display());
            }
            Self::default()
        };

        config.root = match &cli.command {
            Commands::Init { .. } => config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            _ if exists => config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            _ => std::env::current_dir().context("Failed to get current working directory")?,
        };
        config.config_path = config_path;

        if !cli.is_init() {
            config.apply_env(|key| std::env::var(key).ok());
            config.apply_command_options(cli);
            config.normalize_paths(cli);
            config.validate(cli.is_build() || cli.is_serve())?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name } => {
                let dir = name.as_ref().map_or_else(|| cwd.clone(), |n| cwd.join(n));
                let path = dir.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // environment overlay
    // ========================================================================

    /// Overlay credentials and ids from the environment.
    ///
    /// For each setting the first non-blank variable wins, and any hit
    /// replaces the file value:
    ///
    /// | Setting                     | Variables                                                                   |
    /// |-----------------------------|-----------------------------------------------------------------------------|
    /// | `images.cloud_name`         | `CLOUDINARY_CLOUD_NAME`, `PUBLIC_CLOUDINARY_CLOUD_NAME`                     |
    /// | `shopify.store_domain`      | `SHOPIFY_STORE_DOMAIN`, `PUBLIC_SHOPIFY_STORE_DOMAIN`                       |
    /// | `shopify.storefront_token`  | `SHOPIFY_STOREFRONT_ACCESS_TOKEN`, `PUBLIC_SHOPIFY_STOREFRONT_ACCESS_TOKEN` |
    /// | `shopify.admin_token`       | `SHOPIFY_ADMIN_ACCESS_TOKEN`                                                |
    /// | `site.analytics.measurement_id` | `PUBLIC_GA_MEASUREMENT_ID`                                              |
    /// | `site.info.url`             | `SITE_URL`                                                                  |
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                lookup(key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            })
        };

        if let Some(v) = get(&["CLOUDINARY_CLOUD_NAME", "PUBLIC_CLOUDINARY_CLOUD_NAME"]) {
            self.images.cloud_name = v;
        }
        if let Some(v) = get(&["SHOPIFY_STORE_DOMAIN", "PUBLIC_SHOPIFY_STORE_DOMAIN"]) {
            self.shopify.store_domain = Some(v);
        }
        if let Some(v) = get(&[
            "SHOPIFY_STOREFRONT_ACCESS_TOKEN",
            "PUBLIC_SHOPIFY_STOREFRONT_ACCESS_TOKEN",
        ]) {
            self.shopify.storefront_token = Some(v);
        }
        if let Some(v) = get(&["SHOPIFY_ADMIN_ACCESS_TOKEN"]) {
            self.shopify.admin_token = Some(v);
        }
        if let Some(v) = get(&["PUBLIC_GA_MEASUREMENT_ID"]) {
            self.site.analytics.measurement_id = Some(v);
        }
        if let Some(v) = get(&["SITE_URL"]) {
            self.site.info.url = Some(v);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                self.apply_serve_options(*interface, *port);
            }
            Commands::Init { .. } | Commands::Image { .. } | Commands::Shop { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.site.sitemap.enable, args.sitemap.as_ref());

        if let Some(ref url) = args.site_url {
            self.site.info.url = Some(url.clone());
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_options(&mut self, interface: Option<std::net::IpAddr>, port: Option<u16>) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());

        // Local base URL unless one was configured or passed via --site-url
        if self.site.info.url.is_none() {
            self.site.info.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve the output directory against the project root.
    fn normalize_paths(&mut self, cli: &Cli) {
        if self.build.output.is_relative() {
            let base = if cli.output.is_some() {
                std::env::current_dir().unwrap_or_else(|_| self.root.clone())
            } else {
                self.root.clone()
            };
            self.build.output = base.join(&self.build.output);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once. The site
    /// URL is only required when `publishes_site` (build and serve).
    pub fn validate(&self, publishes_site: bool) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site
            .info
            .validate(publishes_site && self.site.sitemap.enable, &mut diag);
        self.site.sitemap.validate(&mut diag);
        self.site.analytics.validate(&mut diag);
        self.images.validate(&mut diag);
        self.shopify.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site.info]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site.info]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
