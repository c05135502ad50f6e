//! Scripted replay of user sessions.
//!
//! A session file is JSON: an optional window size, optional section heights
//! and a list of steps. Each step is either an [`Event`] or a wait that moves
//! the virtual clock.
//!
//! ```json
//! {
//!   "viewport": { "width": 390, "height": 844 },
//!   "section_heights": { "home": 900 },
//!   "steps": [
//!     { "event": "load" },
//!     { "wait": 2500 },
//!     { "event": "select_filter", "filter": "payment" },
//!     { "event": "open_gallery", "id": "altair" },
//!     { "event": "key", "key": "ArrowRight" }
//!   ]
//! }
//! ```
//!
//! Replay builds the page for the site, runs every step through a
//! [`Portfolio`] and records a [`Snapshot`] after each one.
//!
//! A single wait is capped at [`MAX_WAIT_MS`].

use crate::app::{Event, Portfolio, Snapshot};
use crate::catalog::{Catalog, CatalogError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::contact::SimulatedBackend;
use crate::theme::{FileStorage, MemoryStorage, Storage};
use crate::view::{PageLayout, Viewport, build_page};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Step {step}: wait of {wait}ms exceeds the {max}ms limit")]
    WaitTooLong { step: usize, wait: u64, max: u64 },
}

/// Longest single wait a session may ask for. Recurring effects tick every
/// few milliseconds, so replay cost grows with the wait.
pub const MAX_WAIT_MS: u64 = 10 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Wait { wait: u64 },
    Event(Event),
}

impl Step {
    /// Short human-readable form, e.g. `wait 2500` or `select_filter filter=payment`.
    pub fn label(&self) -> String {
        match self {
            Step::Wait { wait } => format!("wait {wait}"),
            Step::Event(event) => event_label(event),
        }
    }
}

fn event_label(event: &Event) -> String {
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(event) else {
        return format!("{:?}", event.kind());
    };
    let mut parts = Vec::new();
    for (key, value) in &fields {
        match (key.as_str(), value) {
            ("event", serde_json::Value::String(name)) => parts.insert(0, name.clone()),
            (_, serde_json::Value::Null) => {}
            (_, serde_json::Value::String(s)) => parts.push(format!("{key}={s}")),
            (_, other) => parts.push(format!("{key}={other}")),
        }
    }
    parts.join(" ")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub viewport: Option<WindowSize>,
    #[serde(default)]
    pub section_heights: BTreeMap<String, f64>,
    pub steps: Vec<Step>,
}

impl Session {
    pub fn parse(content: &str) -> Result<Self, SessionError> {
        let session: Self = serde_json::from_str(content)?;
        session.validate()?;
        Ok(session)
    }

    /// Reject waits longer than [`MAX_WAIT_MS`].
    pub fn validate(&self) -> Result<(), SessionError> {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Wait { wait } if *wait > MAX_WAIT_MS => {
                    return Err(SessionError::WaitTooLong {
                        step: i + 1,
                        wait: *wait,
                        max: MAX_WAIT_MS,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Page layout for this session: its window size and section heights
    /// over the defaults.
    pub fn layout(&self) -> PageLayout {
        let mut viewport = Viewport::default();
        if let Some(size) = self.viewport {
            viewport.width = size.width;
            viewport.height = size.height;
        }
        PageLayout {
            viewport,
            section_heights: self.section_heights.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Make every contact submission fail.
    pub fail_submissions: bool,
    /// Persist the theme to this JSON file instead of memory.
    pub theme_store: Option<PathBuf>,
}

/// The state after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 1-based step number; 0 is the state before any step.
    pub step: usize,
    pub action: String,
    pub snapshot: Snapshot,
}

/// Run `session` against a fresh page for `config` and `catalog`.
pub fn replay(
    session: &Session,
    config: &SiteConfig,
    catalog: &Catalog,
    options: &ReplayOptions,
) -> Vec<StepReport> {
    let page = build_page(config, catalog, &session.layout());
    let storage: Box<dyn Storage> = match &options.theme_store {
        Some(path) => Box::new(FileStorage::new(path)),
        None => Box::new(MemoryStorage::new()),
    };
    let latency = config.contact.latency_ms;
    let backend = if options.fail_submissions {
        SimulatedBackend::failing(latency)
    } else {
        SimulatedBackend::new(latency)
    };
    let mut app = Portfolio::new(page, config, catalog.clone(), storage, Box::new(backend));

    let mut reports = vec![StepReport {
        step: 0,
        action: "start".to_string(),
        snapshot: app.snapshot(),
    }];
    for (i, step) in session.steps.iter().enumerate() {
        debug!(step = i + 1, action = %step.label(), "replay step");
        match step {
            Step::Wait { wait } => app.advance(*wait),
            Step::Event(event) => app.dispatch(event),
        }
        reports.push(StepReport {
            step: i + 1,
            action: step.label(),
            snapshot: app.snapshot(),
        });
    }
    info!(
        steps = session.steps.len(),
        elapsed_ms = app.now(),
        "session replayed"
    );
    reports
}

/// Load the site in `source` and the session at `session_path`, then replay.
pub fn replay_file(
    source: &Path,
    session_path: &Path,
    options: &ReplayOptions,
) -> Result<Vec<StepReport>, SessionError> {
    let config = config::load_config(source)?;
    let catalog = Catalog::load(source)?;
    let session = Session::load(session_path)?;
    Ok(replay(&session, &config, &catalog, options))
}
