//! Initialization helpers for `.portfolio/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{SiteConfig, write_config};
use super::content_store::write_content;
use crate::content::default_content;

/// All canonical paths within `.portfolio/` for a project root.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub site_dir: PathBuf,
    pub config_path: PathBuf,
    pub content_path: PathBuf,
    pub default_out_dir: PathBuf,
}

impl SitePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let site_dir = root.join(".portfolio");
        Self {
            root: root.clone(),
            site_dir: site_dir.clone(),
            config_path: site_dir.join("config.toml"),
            content_path: site_dir.join("content.toml"),
            default_out_dir: root.join("dist"),
        }
    }
}

/// Options for `init_site`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing config and content.
    pub force: bool,
}

/// Create `.portfolio/` with default config and placeholder content.
///
/// Fails if `.portfolio/` already exists unless `options.force` is set.
pub fn init_site(root: &Path, options: &InitOptions) -> Result<SitePaths> {
    let paths = SitePaths::new(root);
    if paths.site_dir.exists() && !paths.site_dir.is_dir() {
        return Err(anyhow!(
            "portfolio init: .portfolio exists but is not a directory"
        ));
    }
    if paths.site_dir.exists() && !options.force {
        return Err(anyhow!(
            "portfolio init: .portfolio already exists (use --force to overwrite)"
        ));
    }

    fs::create_dir_all(&paths.site_dir)
        .with_context(|| format!("create directory {}", paths.site_dir.display()))?;
    write_config(&paths.config_path, &SiteConfig::default())?;
    write_content(&paths.content_path, &default_content())?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::load_config;
    use crate::io::content_store::load_content;

    #[test]
    fn init_writes_loadable_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");

        assert_eq!(load_config(&paths.config_path).expect("config"), SiteConfig::default());
        assert_eq!(load_content(&paths.content_path).expect("content"), default_content());
    }

    #[test]
    fn init_refuses_existing_dir_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_site(temp.path(), &InitOptions { force: false }).expect("init");

        let err = init_site(temp.path(), &InitOptions { force: false }).expect_err("second init");
        assert!(err.to_string().contains("--force"));
        init_site(temp.path(), &InitOptions { force: true }).expect("forced init");
    }
}
