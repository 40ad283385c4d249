//! Contact form submission state machine.
//!
//! Submission is simulated: `submit` moves the form to `Submitting`, and two
//! fixed delays later it is back at `Idle` with the fields cleared. The machine
//! keeps at most one pending deadline, so whoever drives it (a tokio task, a
//! test clock) only ever needs a single timer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::{FormField, FormState, SubmissionStatus, Transition};

/// Fixed delays of the submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTiming {
    /// Time spent in `Submitting` before the success message shows.
    pub submitting: Duration,
    /// Time the success message stays before the form resets.
    pub submitted: Duration,
}

impl Default for SubmissionTiming {
    fn default() -> Self {
        Self {
            submitting: Duration::from_millis(1500),
            submitted: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    at: Duration,
    to: SubmissionStatus,
}

/// Form values plus the submission lifecycle.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    form: FormState,
    status: SubmissionStatus,
    timing: SubmissionTiming,
    pending: Option<Pending>,
}

impl ContactForm {
    pub fn new(timing: SubmissionTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn timing(&self) -> SubmissionTiming {
        self.timing
    }

    /// Deadline of the next scheduled transition, if a cycle is in flight.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|pending| pending.at)
    }

    /// Update one field. Ignored while the success message replaces the form.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.status == SubmissionStatus::Submitted {
            return false;
        }
        self.form.set(field, value);
        true
    }

    /// Start a submission cycle at `now`.
    ///
    /// Returns the `Idle -> Submitting` transition, or `None` if a cycle is
    /// already running (the submit button is disabled then).
    pub fn submit(&mut self, now: Duration) -> Option<Transition> {
        if self.status != SubmissionStatus::Idle {
            return None;
        }
        self.pending = Some(Pending {
            at: now + self.timing.submitting,
            to: SubmissionStatus::Submitted,
        });
        Some(self.transition_to(SubmissionStatus::Submitting, now))
    }

    /// Apply every transition due at or before `now`, in order.
    ///
    /// Each transition is stamped with its scheduled deadline rather than
    /// `now`, so a late caller still observes the exact cycle.
    pub fn advance(&mut self, now: Duration) -> Vec<Transition> {
        let mut applied = Vec::new();
        while let Some(pending) = self.pending.filter(|pending| pending.at <= now) {
            self.pending = match pending.to {
                SubmissionStatus::Submitted => Some(Pending {
                    at: pending.at + self.timing.submitted,
                    to: SubmissionStatus::Idle,
                }),
                SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
            };
            if pending.to == SubmissionStatus::Idle {
                self.form = FormState::default();
            }
            applied.push(self.transition_to(pending.to, pending.at));
        }
        applied
    }

    fn transition_to(&mut self, to: SubmissionStatus, at: Duration) -> Transition {
        let from = self.status;
        self.status = to;
        Transition { from, to, at }
    }
}
