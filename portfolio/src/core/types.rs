//! Shared deterministic types for the page's interactive state.
//!
//! These types carry no I/O and no clock. Time is always passed in by the
//! caller as an offset from the session epoch.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Page sections, in render order. Serialized as their anchor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Hero,
    Projects,
    CaseStudies,
    Skills,
    Experience,
    Education,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::Projects,
        SectionId::CaseStudies,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Contact,
    ];

    /// Anchor used for in-page navigation (`#projects`, ...).
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Projects => "projects",
            SectionId::CaseStudies => "case-studies",
            SectionId::Skills => "skills",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SectionId::ALL
            .into_iter()
            .find(|section| section.anchor() == s)
            .ok_or_else(|| anyhow!("unknown section {s:?}"))
    }
}

/// Contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Message,
}

/// Values typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormState {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Lifecycle of a simulated contact-form submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// A status change, stamped with its offset from the session epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: SubmissionStatus,
    pub to: SubmissionStatus,
    #[serde(rename = "at_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
}

fn serialize_millis<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}
