use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::cache::DatasetCache;
use crate::session::{DashboardEvent, Session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Datasets loaded so far, read at most once each.
    pub cache: DatasetCache,

    /// File the current (or last attempted) dataset comes from.
    pub data_path: Option<PathBuf>,

    /// Filters and derived outputs; `None` until a dataset loads.
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` (through the cache) and start a fresh session on it.
    ///
    /// On failure the previous session, if any, stays on screen and the
    /// error is reported in `status_message`.
    pub fn open(&mut self, path: &Path) {
        self.data_path = Some(path.to_path_buf());
        if let Err(e) = self.start_session(path) {
            log::error!("Failed to load dataset: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    fn start_session(&mut self, path: &Path) -> Result<()> {
        let dataset = self
            .cache
            .get_or_load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.session = Some(Session::new(dataset));
        self.status_message = None;
        Ok(())
    }

    /// Drop the cache and read the current file again.
    pub fn reload(&mut self) {
        self.cache.clear();
        if let Some(path) = self.data_path.clone() {
            self.open(&path);
        }
    }

    /// Forward sidebar events to the session.
    pub fn apply(&mut self, events: Vec<DashboardEvent>) {
        if events.is_empty() {
            return;
        }
        if let Some(session) = &mut self.session {
            session.apply_all(events);
        }
    }

    /// `(loaded, visible)` record counts for the top bar.
    pub fn counts(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|s| (s.dataset().len(), s.view().len()))
    }
}
