//! Configuration file lookup.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// ```text
/// /home/user/landing/public/img/  ← cwd
/// /home/user/landing/vitrine.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Walk up from `start` until `config_name` exists.
fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("public/img");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("vitrine.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("vitrine.toml")).unwrap();
        assert_eq!(found, dir.path().join("vitrine.toml"));
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("vitrine.toml")).unwrap();
        let found = find_config_from(dir.path(), Path::new("vitrine.toml"));
        assert_ne!(found, Some(dir.path().join("vitrine.toml")));
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_from(dir.path(), &path), None);
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_from(Path::new("/"), &path), Some(path));
    }
}
