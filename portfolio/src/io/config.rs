//! Site configuration stored under `.portfolio/config.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::motion::{MotionPlan, Stagger};
use crate::core::reveal::RevealThresholds;
use crate::core::submission::SubmissionTiming;
use crate::core::types::SectionId;

/// Site configuration (TOML).
///
/// Meant to be edited by hand. Missing fields take the defaults the page was
/// designed around.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub contact: ContactConfig,
    pub submission: SubmissionConfig,
    pub reveal: RevealConfig,
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    /// Show the booking card instead of the message form.
    pub use_calendar: bool,
    pub calendar_link: String,
    pub email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            use_calendar: true,
            calendar_link: "https://cal.com/username".to_string(),
            email: "hello@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Milliseconds spent showing "Sending...".
    pub submitting_ms: u64,
    /// Milliseconds the success message stays before the form resets.
    pub submitted_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            submitting_ms: 1500,
            submitted_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction required before a section reveals.
    pub default_amount: f64,
    /// Per-section overrides keyed by anchor (`contact = 0.5`). Applied on
    /// top of the built-in overrides, so `skills` keeps 0.2 unless named here.
    pub sections: BTreeMap<SectionId, f64>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        let thresholds = RevealThresholds::default();
        Self {
            default_amount: thresholds.default_amount,
            sections: thresholds.overrides,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MotionConfig {
    pub stagger_ms: u64,
    pub item_stagger_ms: u64,
    pub timeline_stagger_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 150,
            item_stagger_ms: 100,
            timeline_stagger_ms: 200,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact: ContactConfig::default(),
            submission: SubmissionConfig::default(),
            reveal: RevealConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.contact.email.trim().is_empty() {
            return Err(anyhow!("contact.email must not be empty"));
        }
        if self.contact.use_calendar && self.contact.calendar_link.trim().is_empty() {
            return Err(anyhow!(
                "contact.calendar_link must be set when use_calendar is true"
            ));
        }
        if self.submission.submitting_ms == 0 {
            return Err(anyhow!("submission.submitting_ms must be > 0"));
        }
        if self.submission.submitted_ms == 0 {
            return Err(anyhow!("submission.submitted_ms must be > 0"));
        }
        validate_amount("reveal.default_amount", self.reveal.default_amount)?;
        for (section, amount) in &self.reveal.sections {
            validate_amount(&format!("reveal.sections.{section}"), *amount)?;
        }
        Ok(())
    }

    pub fn submission_timing(&self) -> SubmissionTiming {
        SubmissionTiming {
            submitting: Duration::from_millis(self.submission.submitting_ms),
            submitted: Duration::from_millis(self.submission.submitted_ms),
        }
    }

    pub fn reveal_thresholds(&self) -> RevealThresholds {
        let mut overrides = RevealThresholds::default().overrides;
        overrides.extend(&self.reveal.sections);
        RevealThresholds {
            default_amount: self.reveal.default_amount,
            overrides,
        }
    }

    pub fn motion_plan(&self) -> MotionPlan {
        MotionPlan {
            section: Stagger::new(Duration::from_millis(self.motion.stagger_ms)),
            cards: Stagger::new(Duration::from_millis(self.motion.item_stagger_ms)),
            timeline: Stagger::new(Duration::from_millis(self.motion.timeline_stagger_ms)),
        }
    }
}

fn validate_amount(key: &str, amount: f64) -> Result<()> {
    if !(amount > 0.0 && amount <= 1.0) {
        return Err(anyhow!("{key} must be in (0, 1], got {amount}"));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SiteConfig::default()`.
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        let cfg = SiteConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SiteConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SiteConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let cfg = SiteConfig::default();
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[contact]\nuse_calendar = false\n\n[reveal.sections]\ncontact = 0.5\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert!(!cfg.contact.use_calendar);
        assert_eq!(cfg.submission, SubmissionConfig::default());
        assert_eq!(cfg.reveal_thresholds().amount_for(SectionId::Contact), 0.5);
        assert_eq!(cfg.reveal_thresholds().amount_for(SectionId::Skills), 0.2);
        assert_eq!(cfg.reveal_thresholds().amount_for(SectionId::Projects), 0.3);
    }

    #[test]
    fn user_override_replaces_builtin_skills_amount() {
        let cfg: SiteConfig = toml::from_str("[reveal.sections]
skills = 0.6
").expect("parse");
        assert_eq!(cfg.reveal_thresholds().amount_for(SectionId::Skills), 0.6);
    }

    #[test]
    fn rejects_zero_delay_and_bad_threshold() {
        let mut cfg = SiteConfig::default();
        cfg.submission.submitted_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SiteConfig::default();
        cfg.reveal.sections.insert(SectionId::Hero, 1.5);
        let err = cfg.validate().expect_err("threshold out of range");
        assert!(err.to_string().contains("reveal.sections.hero"));
    }

    #[test]
    fn timing_follows_config() {
        let mut cfg = SiteConfig::default();
        cfg.submission.submitting_ms = 10;
        assert_eq!(cfg.submission_timing().submitting, Duration::from_millis(10));
        assert_eq!(cfg.submission_timing().submitted, Duration::from_millis(3000));
    }
}
