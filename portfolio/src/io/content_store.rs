//! Content load/save helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::content::{Content, default_content};

/// Load content from disk, or the placeholder content if the file is missing.
pub fn load_content(path: &Path) -> Result<Content> {
    if !path.exists() {
        debug!(path = %path.display(), "content file missing, using placeholder content");
        return Ok(default_content());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read content {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse content {}", path.display()))
}

/// Write content as TOML.
pub fn write_content(path: &Path, content: &Content) -> Result<()> {
    let mut buf = toml::to_string_pretty(content).context("serialize content toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_placeholder() {
        let temp = tempfile::tempdir().expect("tempdir");
        let content = load_content(&temp.path().join("content.toml")).expect("load");
        assert_eq!(content, default_content());
    }

    #[test]
    fn parse_error_names_the_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("content.toml");
        fs::write(&path, "[profile]\nname = 3\n").expect("write");

        let err = load_content(&path).expect_err("invalid content");
        assert!(format!("{err:#}").contains("content.toml"));
    }

    #[test]
    fn sections_may_be_omitted() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("content.toml");
        fs::write(&path, "[profile]\nname = \"Ada\"\ntagline = \"Builder\"\n").expect("write");

        let content = load_content(&path).expect("load");
        assert_eq!(content.profile.name, "Ada");
        assert!(content.projects.is_empty());
        assert!(content.profile.socials.is_empty());
    }
}
