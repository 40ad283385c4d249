//! Per-page sessions and the submission delay chain.
//!
//! A session owns one contact form machine and one reveal controller. The
//! machine only records deadlines; the chain task spawned on submit sleeps
//! until each deadline and applies it. One task per cycle keeps the two
//! transitions ordered without a second timer.
//!
//! Sessions that stop calling in (a missed `pagehide` beacon, a killed tab)
//! are dropped by the sweeper once idle for [`SESSION_IDLE_TIMEOUT`].

use std::time::Duration;

use portfolio::core::reveal::RevealController;
use portfolio::core::submission::ContactForm;
use portfolio::core::types::{FormField, FormState, SectionId, SubmissionStatus};
use portfolio::io::config::SiteConfig;
use serde::Serialize;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::state::{AppState, ChangeEvent, SessionId};

/// How long a session may go without a request before it is swept.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
/// How often the sweeper looks for idle sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct Session {
    epoch: Instant,
    last_seen: Instant,
    form: ContactForm,
    reveal: RevealController,
    chain: Option<AbortHandle>,
}

impl Session {
    /// New session; the hero is revealed on mount.
    pub fn new(config: &SiteConfig) -> Self {
        let mut reveal = RevealController::new(config.reveal_thresholds());
        reveal.on_visible(SectionId::Hero);
        let epoch = Instant::now();
        Self {
            epoch,
            last_seen: epoch,
            form: ContactForm::new(config.submission_timing()),
            reveal,
            chain: None,
        }
    }

    /// Time since the session started.
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// A running delay chain counts as activity.
    fn is_idle(&self, now: Instant, idle: Duration) -> bool {
        self.chain.is_none() && now.saturating_duration_since(self.last_seen) >= idle
    }

    pub fn snapshot(&self, id: SessionId) -> SessionSnapshot {
        SessionSnapshot {
            id,
            status: self.form.status(),
            form: self.form.form().clone(),
            revealed: self.reveal.revealed(),
            next_transition_ms: self
                .form
                .next_deadline()
                .map(|deadline| deadline.saturating_sub(self.now()).as_millis() as u64),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(chain) = self.chain.take() {
            chain.abort();
        }
    }
}

/// Session view returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub status: SubmissionStatus,
    pub form: FormState,
    pub revealed: Vec<SectionId>,
    /// Milliseconds until the next scheduled status change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_transition_ms: Option<u64>,
}

/// Open a session. `None` if the session table is unusable.
pub fn create_session(state: &AppState) -> Option<SessionSnapshot> {
    let id = state.next_session_id();
    let session = Session::new(&state.config());
    let snapshot = session.snapshot(id);
    let Ok(mut sessions) = state.sessions.lock() else {
        warn!(session = id, "session table poisoned, not opening session");
        return None;
    };
    sessions.insert(id, session);
    info!(session = id, "session opened");
    Some(snapshot)
}

pub fn snapshot(state: &AppState, id: SessionId) -> Option<SessionSnapshot> {
    let mut sessions = state.sessions.lock().ok()?;
    let session = sessions.get_mut(&id)?;
    session.touch();
    Some(session.snapshot(id))
}

/// Tear a session down. Aborts a pending delay chain.
pub fn close_session(state: &AppState, id: SessionId) -> bool {
    let removed = state
        .sessions
        .lock()
        .ok()
        .and_then(|mut sessions| sessions.remove(&id));
    if removed.is_some() {
        info!(session = id, "session closed");
    }
    removed.is_some()
}

/// Update one form field. `None` if the session does not exist.
pub fn set_field(
    state: &AppState,
    id: SessionId,
    field: FormField,
    value: String,
) -> Option<bool> {
    let mut sessions = state.sessions.lock().ok()?;
    let session = sessions.get_mut(&id)?;
    session.touch();
    Some(session.form.set_field(field, value))
}

/// Report a section's intersection ratio. Returns whether it revealed now.
pub fn observe(state: &AppState, id: SessionId, section: SectionId, ratio: f64) -> Option<bool> {
    let revealed = {
        let mut sessions = state.sessions.lock().ok()?;
        let session = sessions.get_mut(&id)?;
        session.touch();
        session.reveal.observe(section, ratio)
    };
    if revealed {
        debug!(session = id, section = %section, ratio, "section revealed");
        let _ = state
            .event_tx
            .send(ChangeEvent::SectionRevealed { session: id, section });
    }
    Some(revealed)
}

/// Submit the form and start the delay chain.
///
/// Returns `Some(false)` when a cycle is already running.
pub fn submit(state: &AppState, id: SessionId) -> Option<bool> {
    let started = {
        let mut sessions = state.sessions.lock().ok()?;
        let session = sessions.get_mut(&id)?;
        session.touch();
        let now = session.now();
        let started = session.form.submit(now);
        if started.is_some() {
            let task = tokio::spawn(run_submission_chain(state.clone(), id));
            session.chain = Some(task.abort_handle());
        }
        started
    };
    let Some(transition) = started else {
        debug!(session = id, "submit ignored, cycle in progress");
        return Some(false);
    };
    info!(session = id, "form submitted");
    let _ = state.event_tx.send(ChangeEvent::SubmissionChanged {
        session: id,
        status: transition.to,
    });
    Some(true)
}

/// Drop every session idle for at least `idle`. Returns how many were dropped.
pub fn sweep_idle_sessions(state: &AppState, idle: Duration) -> usize {
    let Ok(mut sessions) = state.sessions.lock() else {
        return 0;
    };
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|id, session| {
        let keep = !session.is_idle(now, idle);
        if !keep {
            debug!(session = *id, "idle session swept");
        }
        keep
    });
    before - sessions.len()
}

/// Start the idle-session sweeper in a background task.
pub fn start_session_sweeper(state: AppState) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let swept = sweep_idle_sessions(&state, SESSION_IDLE_TIMEOUT);
            if swept > 0 {
                info!(swept, "dropped idle sessions");
            }
        }
    });
}

async fn run_submission_chain(state: AppState, id: SessionId) {
    loop {
        let wake_at = {
            let Ok(sessions) = state.sessions.lock() else {
                return;
            };
            let Some(session) = sessions.get(&id) else {
                return;
            };
            let Some(deadline) = session.form.next_deadline() else {
                break;
            };
            session.epoch + deadline
        };

        tokio::time::sleep_until(wake_at).await;

        let transitions = {
            let Ok(mut sessions) = state.sessions.lock() else {
                return;
            };
            let Some(session) = sessions.get_mut(&id) else {
                return;
            };
            let now = session.now();
            session.form.advance(now)
        };

        for transition in transitions {
            debug!(
                session = id,
                from = ?transition.from,
                to = ?transition.to,
                at_ms = transition.at.as_millis() as u64,
                "submission transition"
            );
            let _ = state.event_tx.send(ChangeEvent::SubmissionChanged {
                session: id,
                status: transition.to,
            });
        }
    }

    if let Ok(mut sessions) = state.sessions.lock()
        && let Some(session) = sessions.get_mut(&id)
    {
        session.chain = None;
    }
}
