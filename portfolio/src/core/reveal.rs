//! One-shot reveal latches for page sections.

use std::collections::BTreeMap;

use crate::core::types::SectionId;

/// Fraction of a section that must intersect the viewport before it reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealThresholds {
    pub default_amount: f64,
    pub overrides: BTreeMap<SectionId, f64>,
}

impl RevealThresholds {
    pub fn amount_for(&self, section: SectionId) -> f64 {
        self.overrides
            .get(&section)
            .copied()
            .unwrap_or(self.default_amount)
    }
}

impl Default for RevealThresholds {
    fn default() -> Self {
        Self {
            default_amount: 0.3,
            overrides: BTreeMap::from([(SectionId::Skills, 0.2)]),
        }
    }
}

/// Owns the reveal latch of every section on the page.
///
/// A latch starts `false` and flips to `true` the first time its section is
/// visible. It never flips back.
#[derive(Debug, Clone, Default)]
pub struct RevealController {
    thresholds: RevealThresholds,
    latches: BTreeMap<SectionId, bool>,
}

impl RevealController {
    pub fn new(thresholds: RevealThresholds) -> Self {
        Self {
            thresholds,
            latches: SectionId::ALL.into_iter().map(|s| (s, false)).collect(),
        }
    }

    pub fn thresholds(&self) -> &RevealThresholds {
        &self.thresholds
    }

    /// Latch `section` as visible.
    ///
    /// Returns `true` only for the call that flipped the latch; that is the
    /// caller's cue to run the entrance transition.
    pub fn on_visible(&mut self, section: SectionId) -> bool {
        let latch = self.latches.entry(section).or_insert(false);
        if *latch {
            return false;
        }
        *latch = true;
        true
    }

    /// Report an intersection ratio; reveals once the section's threshold is met.
    pub fn observe(&mut self, section: SectionId, ratio: f64) -> bool {
        if self.is_revealed(section) || ratio < self.thresholds.amount_for(section) {
            return false;
        }
        self.on_visible(section)
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.latches.get(&section).copied().unwrap_or(false)
    }

    /// Revealed sections in page order.
    pub fn revealed(&self) -> Vec<SectionId> {
        self.latches
            .iter()
            .filter_map(|(section, latched)| latched.then_some(*section))
            .collect()
    }
}
