//! Server-Sent Events stream and config/content file watcher.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use notify::{Event as NotifyEvent, EventKind, PollWatcher, RecursiveMode, Watcher};
use portfolio::core::types::{SectionId, SubmissionStatus};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::{AppState, ChangeEvent, SessionId, Site};

#[derive(Debug, Serialize)]
struct SsePayload {
    #[serde(rename = "type")]
    event_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<SessionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<SubmissionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<SectionId>,
}

impl From<&ChangeEvent> for SsePayload {
    fn from(event: &ChangeEvent) -> Self {
        match event {
            ChangeEvent::SubmissionChanged { session, status } => SsePayload {
                event_type: "submission_changed",
                session: Some(*session),
                status: Some(*status),
                section: None,
            },
            ChangeEvent::SectionRevealed { session, section } => SsePayload {
                event_type: "section_revealed",
                session: Some(*session),
                status: None,
                section: Some(*section),
            },
            ChangeEvent::ContentChanged => SsePayload {
                event_type: "content_changed",
                session: None,
                status: None,
                section: None,
            },
        }
    }
}

/// SSE endpoint handler.
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_tx.subscribe();

    let stream = async_stream::stream! {
        // Send initial connected event
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            match rx.recv().await {
                Ok(change_event) => {
                    let payload = SsePayload::from(&change_event);
                    if let Ok(json) = serde_json::to_string(&payload) {
                        yield Ok(Event::default().event("change").data(json));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "SSE client lagged, some events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Start the file watcher in a background task.
pub fn start_file_watcher(state: AppState) {
    tokio::spawn(async move {
        if let Err(e) = run_file_watcher(state).await {
            warn!(error = %e, "file watcher failed");
        }
    });
}

async fn run_file_watcher(state: AppState) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<NotifyEvent>(100);

    let mut watcher = PollWatcher::new(
        move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.try_send(event);
            }
        },
        notify::Config::default().with_poll_interval(Duration::from_millis(250)),
    )?;

    let site_dir = &state.paths.site_dir;
    if site_dir.exists() {
        watcher.watch(site_dir, RecursiveMode::NonRecursive)?;
        info!(path = %site_dir.display(), "watching site directory");
    } else {
        info!(
            path = %site_dir.display(),
            "site directory missing, serving defaults without reload"
        );
        return Ok(());
    }

    // Editors often write a file several times in a row; reload once per batch.
    let mut pending_events: Vec<NotifyEvent> = Vec::new();
    let mut flush_tick = tokio::time::interval(Duration::from_millis(250));
    flush_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                pending_events.push(event);
            }
            _ = flush_tick.tick() => {
                if pending_events.is_empty() {
                    continue;
                }
                process_events(&state, &pending_events);
                pending_events.clear();
            }
        }
    }
}

/// Reload and re-render when config or content changed.
///
/// A file that no longer parses keeps the previous page live.
fn process_events(state: &AppState, events: &[NotifyEvent]) {
    if !touches_site_files(state, events) {
        return;
    }
    match Site::load(&state.paths) {
        Ok(site) => {
            debug!("broadcasting content change");
            state.replace_site(site);
            info!("site reloaded");
        }
        Err(e) => {
            warn!(error = %format!("{e:#}"), "reload failed, keeping previous page");
        }
    }
}

fn touches_site_files(state: &AppState, events: &[NotifyEvent]) -> bool {
    let watched = [
        state.paths.config_path.as_path(),
        state.paths.content_path.as_path(),
    ];
    events
        .iter()
        .filter(|event| {
            matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            )
        })
        .flat_map(|event| event.paths.iter())
        .any(|path| watched.contains(&path.as_path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio::io::content_store::write_content;
    use portfolio::io::init::{InitOptions, init_site};
    use portfolio::test_support::empty_content;

    fn modify_event(path: std::path::PathBuf) -> NotifyEvent {
        NotifyEvent {
            kind: EventKind::Modify(notify::event::ModifyKind::Any),
            paths: vec![path],
            attrs: Default::default(),
        }
    }

    #[test]
    fn content_edit_rerenders_and_broadcasts() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");
        let state = AppState::new(paths.clone(), Site::load(&paths).expect("load"));
        let mut rx = state.event_tx.subscribe();

        write_content(&paths.content_path, &empty_content("Grace Hopper")).expect("write");
        process_events(&state, &[modify_event(paths.content_path.clone())]);

        assert_eq!(rx.try_recv().expect("event"), ChangeEvent::ContentChanged);
        let site = state.site.read().expect("site");
        assert!(site.page.contains("Grace Hopper"));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");
        let state = AppState::new(paths.clone(), Site::load(&paths).expect("load"));
        let mut rx = state.event_tx.subscribe();

        process_events(&state, &[modify_event(paths.site_dir.join("notes.md"))]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn broken_config_keeps_previous_page() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_site(temp.path(), &InitOptions { force: false }).expect("init");
        let state = AppState::new(paths.clone(), Site::load(&paths).expect("load"));
        let before = state.site.read().expect("site").page.clone();
        let mut rx = state.event_tx.subscribe();

        std::fs::write(&paths.config_path, "[submission]\nsubmitting_ms = 0\n").expect("write");
        process_events(&state, &[modify_event(paths.config_path.clone())]);

        assert!(rx.try_recv().is_err());
        assert_eq!(state.site.read().expect("site").page, before);
    }

    #[test]
    fn payload_names_session_and_status() {
        let payload = SsePayload::from(&ChangeEvent::SubmissionChanged {
            session: 7,
            status: SubmissionStatus::Submitted,
        });
        let json = serde_json::to_string(&payload).expect("serialize");
        assert_eq!(
            json,
            r#"{"type":"submission_changed","session":7,"status":"submitted"}"#
        );
    }
}
