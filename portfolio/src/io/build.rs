//! Static site build: render the page and write it next to its assets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::config::load_config;
use super::content_store::load_content;
use super::init::SitePaths;
use super::render::{RenderMode, SITE_CSS, SITE_JS, render_page};
use crate::core::invariants::check_content;

/// Files produced by a build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub out_dir: PathBuf,
    pub files: Vec<PathBuf>,
    /// Content problems found along the way. The page is rendered regardless.
    pub warnings: Vec<String>,
}

/// Render the site from `paths` into `out_dir`.
pub fn build_site(paths: &SitePaths, out_dir: &Path) -> Result<BuildOutput> {
    let config = load_config(&paths.config_path)?;
    let content = load_content(&paths.content_path)?;

    let warnings = check_content(&content);
    for warning in &warnings {
        warn!(problem = %warning, "content problem");
    }

    let html = render_page(&content, &config, RenderMode::Static)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;
    let mut files = Vec::new();
    let outputs = [
        ("index.html", html.as_str()),
        ("site.css", SITE_CSS),
        ("site.js", SITE_JS),
    ];
    for (name, contents) in outputs {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        files.push(path);
    }

    info!(out_dir = %out_dir.display(), files = files.len(), "site built");
    Ok(BuildOutput {
        out_dir: out_dir.to_path_buf(),
        files,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::content_store::write_content;
    use crate::io::init::{InitOptions, init_site};

    #[test]
    fn build_writes_page_and_assets() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");

        let output = build_site(&paths, &paths.default_out_dir).expect("build");
        assert_eq!(output.files.len(), 3);
        assert!(output.warnings.is_empty());
        let html = fs::read_to_string(paths.default_out_dir.join("index.html")).expect("read");
        assert!(html.contains("data-live=\"false\""));
    }

    #[test]
    fn malformed_content_still_builds() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");
        let mut content = crate::content::default_content();
        content.skills[0].icon = String::new();
        write_content(&paths.content_path, &content).expect("write content");

        let output = build_site(&paths, &temp.path().join("out")).expect("build");
        assert_eq!(output.warnings, vec!["skills[0]: icon must not be empty".to_string()]);
        assert!(temp.path().join("out").join("index.html").exists());
    }
}
