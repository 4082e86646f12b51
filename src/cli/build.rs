//! `vitrine build`: write site metadata files into the output directory.
//!
//! Generators run in parallel; a generator that has nothing to emit
//! (disabled, or missing configuration) is skipped with its own notice.

use crate::generator::{analytics, robots, sitemap};
use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

/// One rendered output file.
struct Artifact {
    path: PathBuf,
    body: Vec<u8>,
}

/// Render all enabled generators and write them into `build.output`.
///
/// Returns the written paths.
pub fn build_site(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory '{}'", output.display()))?;

    let (sitemap, (robots, analytics)) = rayon::join(
        || {
            sitemap::render_sitemap(config).map(|body| Artifact {
                path: config.site.sitemap.path.clone(),
                body,
            })
        },
        || {
            rayon::join(
                || {
                    robots::render_robots(config).map(|body| Artifact {
                        path: "robots.txt".into(),
                        body: body.into_bytes(),
                    })
                },
                || {
                    analytics::render_script(config).map(|body| Artifact {
                        path: config.site.analytics.path.clone(),
                        body: body.into_bytes(),
                    })
                },
            )
        },
    );

    let mut written = Vec::new();
    for artifact in [sitemap, robots, analytics].into_iter().flatten() {
        let path = output.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        fs::write(&path, &artifact.body)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        log!("build"; "{}", config.root_relative(&path).display());
        written.push(path);
    }

    if let Some(snippet) = analytics::head_snippet(config) {
        log!("build"; "add to <head>: {snippet}");
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, extra: &str) -> SiteConfig {
        let mut config = test_parse_config(extra);
        config.root = dir.path().to_path_buf();
        config.build.output = dir.path().join("dist");
        config
    }

    #[test]
    fn test_writes_all_files() {
        let dir = TempDir::new().unwrap();
        let config = config_in(
            &dir,
            "url = \"https://acme.example\"\n[site.analytics]\nmeasurement_id = \"G-ABC123\"",
        );

        let written = build_site(&config).unwrap();
        assert_eq!(written.len(), 3);

        let out = dir.path().join("dist");
        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://acme.example/products</loc>"));
        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://acme.example/sitemap.xml\n"));
        let script = fs::read_to_string(out.join("analytics.js")).unwrap();
        assert!(script.contains("G-ABC123"));
    }

    #[test]
    fn test_degraded_build_writes_robots_only() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "");

        let written = build_site(&config).unwrap();
        assert_eq!(written, vec![dir.path().join("dist/robots.txt")]);
    }

    #[test]
    fn test_nested_output_paths() {
        let dir = TempDir::new().unwrap();
        let config = config_in(
            &dir,
            "url = \"https://acme.example\"\n[site.sitemap]\npath = \"seo/sitemap.xml\"\n[site.robots]\nenable = false",
        );

        build_site(&config).unwrap();
        assert!(dir.path().join("dist/seo/sitemap.xml").is_file());
        assert!(!dir.path().join("dist/robots.txt").exists());
    }
}
