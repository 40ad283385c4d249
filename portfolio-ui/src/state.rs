//! Shared application state for the portfolio server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use anyhow::Result;
use portfolio::content::Content;
use portfolio::core::types::{SectionId, SubmissionStatus};
use portfolio::io::config::{SiteConfig, load_config};
use portfolio::io::content_store::load_content;
use portfolio::io::init::SitePaths;
use portfolio::io::render::{PageRenderer, RenderMode};
use tokio::sync::broadcast;

use crate::session::Session;

pub type SessionId = u64;

/// Events broadcast to SSE clients.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    SubmissionChanged {
        session: SessionId,
        status: SubmissionStatus,
    },
    SectionRevealed {
        session: SessionId,
        section: SectionId,
    },
    /// Config or content changed on disk and the page was re-rendered.
    ContentChanged,
}

/// Rendered page plus the inputs it was rendered from.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub content: Content,
    pub page: String,
}

impl Site {
    /// Load config and content from disk and render the live page.
    pub fn load(paths: &SitePaths) -> Result<Self> {
        let config = load_config(&paths.config_path)?;
        let content = load_content(&paths.content_path)?;
        let page = PageRenderer::new()?.render(&content, &config, RenderMode::Live)?;
        Ok(Self {
            config,
            content,
            page,
        })
    }
}

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub paths: SitePaths,
    pub site: Arc<RwLock<Site>>,
    pub sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    next_session: Arc<AtomicU64>,
    /// Broadcast sender for session and content events.
    pub event_tx: Arc<broadcast::Sender<ChangeEvent>>,
}

impl AppState {
    pub fn new(paths: SitePaths, site: Site) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            paths,
            site: Arc::new(RwLock::new(site)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_session: Arc::new(AtomicU64::new(1)),
            event_tx: Arc::new(event_tx),
        }
    }

    pub fn next_session_id(&self) -> SessionId {
        self.next_session.fetch_add(1, Ordering::Relaxed)
    }

    /// Current config, cloned out of the lock.
    pub fn config(&self) -> SiteConfig {
        self.site
            .read()
            .map(|site| site.config.clone())
            .unwrap_or_default()
    }

    /// Replace the rendered site and tell every client to reload.
    pub fn replace_site(&self, site: Site) {
        if let Ok(mut guard) = self.site.write() {
            *guard = site;
        }
        let _ = self.event_tx.send(ChangeEvent::ContentChanged);
    }
}
