//! Project initialization.
//!
//! Writes a commented `vitrine.toml` assembled from the section templates
//! generated by `#[derive(Config)]`, plus an ignore file for the output
//! directory.

use crate::config::section::site::{AnalyticsConfig, RobotsConfig, SiteInfoConfig, SitemapConfig};
use crate::config::section::{BuildConfig, ImagesConfig, ServeConfig, ShopifyConfig};
use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Generate vitrine.toml content with comments
pub fn generate_config_template() -> String {
    let sections = [
        SiteInfoConfig::template_with_header(),
        SitemapConfig::template_with_header(),
        RobotsConfig::template_with_header(),
        AnalyticsConfig::template_with_header(),
        ImagesConfig::template_with_header(),
        ShopifyConfig::template_with_header(),
        ServeConfig::template_with_header(),
        BuildConfig::template_with_header(),
    ];

    let mut out = format!(
        "# vitrine configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str(&sections.join("\n"));
    out
}

/// Write the config template into the project root.
///
/// Refuses to overwrite an existing config file.
pub fn new_project(config: &SiteConfig) -> Result<()> {
    let path = &config.config_path;
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it or choose a different directory.",
            path.display()
        );
    }

    let root = &config.root;
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;

    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    let output_dir = config.root_relative(root.join(&config.build.output));
    write_ignore_files(root, &output_dir)?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

/// Append the output directory to ignore files, skipping duplicates.
fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let entry = format!("/{}/", output_dir.display().to_string().trim_matches('/'));

    for name in IGNORE_FILES {
        let path = root.join(name);
        let mut content = fs::read_to_string(&path).unwrap_or_default();
        if content.lines().any(|line| line.trim() == entry) {
            continue;
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&entry);
        content.push('\n');
        fs::write(&path, content)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_in(dir: &Path) -> SiteConfig {
        SiteConfig {
            config_path: dir.join("vitrine.toml"),
            root: dir.to_path_buf(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_template_has_every_section() {
        let template = generate_config_template();
        for section in [
            "[site.info]",
            "[site.sitemap]",
            "[site.robots]",
            "[site.analytics]",
            "[images]",
            "[shopify]",
            "[serve]",
            "[build]",
        ] {
            assert!(template.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_template_parses_without_unknown_fields() {
        let template = generate_config_template();
        let config = crate::config::test_parse_config(
            // test_parse_config prepends its own [site.info]; strip ours
            template
                .split("[site.sitemap]")
                .nth(1)
                .map(|rest| format!("[site.sitemap]{rest}"))
                .unwrap()
                .as_str(),
        );
        assert_eq!(config.images.base_url, "https://res.cloudinary.com");
        assert_eq!(config.shopify.api_version, "2024-01");
        assert!(config.shopify.storefront_token.is_none());
    }

    #[test]
    fn test_new_project_writes_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("landing");
        new_project(&project_in(&root)).unwrap();

        let written = fs::read_to_string(root.join("vitrine.toml")).unwrap();
        assert_eq!(written, generate_config_template());
        let ignore = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(ignore, "/dist/\n");
    }

    #[test]
    fn test_existing_config_is_kept() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("vitrine.toml"), "# mine\n").unwrap();

        assert!(new_project(&project_in(dir.path())).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("vitrine.toml")).unwrap(),
            "# mine\n"
        );
    }

    #[test]
    fn test_ignore_entry_not_duplicated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "target\n/dist/\n").unwrap();
        write_ignore_files(dir.path(), Path::new("dist")).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
            "target\n/dist/\n"
        );
    }
}
