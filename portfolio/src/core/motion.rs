//! Staggered entrance timing for children of a revealed container.

use std::time::Duration;

/// Delay schedule for the children of one container.
///
/// Child `i` starts `delay_children + i * stagger` after its container reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub delay_children: Duration,
    pub stagger: Duration,
}

impl Stagger {
    pub const fn new(stagger: Duration) -> Self {
        Self {
            delay_children: Duration::ZERO,
            stagger,
        }
    }

    pub const fn with_delay(mut self, delay_children: Duration) -> Self {
        self.delay_children = delay_children;
        self
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay_children + self.stagger.saturating_mul(index)
    }

    /// Delays for `count` children, in order.
    pub fn delays(&self, count: usize) -> Vec<Duration> {
        (0..count).map(|index| self.delay_for(index)).collect()
    }
}

/// Stagger presets used across the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPlan {
    /// Heading, intro and body blocks inside a section.
    pub section: Stagger,
    /// Project, case-study and skill cards.
    pub cards: Stagger,
    /// Experience timeline entries.
    pub timeline: Stagger,
}

impl Default for MotionPlan {
    fn default() -> Self {
        Self {
            section: Stagger::new(Duration::from_millis(150)),
            cards: Stagger::new(Duration::from_millis(100)),
            timeline: Stagger::new(Duration::from_millis(200)),
        }
    }
}
