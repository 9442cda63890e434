use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use rare_disease_assistant::{
    diagnose, Dataset, DatasetCache, LoadError, Loader, MatchResult, QueryError,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Message shown below the Diagnose button after a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Request rejected before ranking (e.g. nothing selected).
    Warning(String),
    /// Ranking ran but no row matched.
    NoMatch,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Session snapshot; loaded once.
    pub cache: DatasetCache,

    /// Receives the outcome of the background load.
    pending: Option<Receiver<Result<Dataset, LoadError>>>,

    /// Symptoms ticked in the checklist.
    pub selected: BTreeSet<String>,

    /// Checklist filter text.
    pub search: String,

    /// Last successful ranking.
    pub result: Option<MatchResult>,

    pub notice: Option<Notice>,

    /// Dismissible load error.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Start the cold-start load on a worker thread. Does nothing once the
    /// cache has an outcome or a load is already running.
    pub fn start_loading(&mut self, loader: Loader) {
        if self.cache.is_loaded() || self.pending.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // Receiver gone means the window closed; nothing to report to.
            let _ = tx.send(loader.load());
        });
        self.pending = Some(rx);
        self.loading = true;
    }

    /// Pick up the load outcome if the worker has finished.
    pub fn poll_loading(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(LoadError::Unavailable(
                "loader thread stopped unexpectedly".to_string(),
            )),
        };
        self.pending = None;
        self.loading = false;
        if let Err(e) = self.cache.install(outcome) {
            self.status_message = Some(e.user_message());
        }
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.cache.dataset()
    }

    /// Toggle a single symptom in the selection.
    pub fn toggle_symptom(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.result = None;
        self.notice = None;
    }

    /// Run the ranking for the current selection.
    pub fn run_diagnosis(&mut self) {
        let Some(ds) = self.cache.dataset().cloned() else {
            return;
        };
        let symptoms: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        match diagnose(&ds, &symptoms) {
            Ok(result) if result.is_empty() => {
                self.result = None;
                self.notice = Some(Notice::NoMatch);
            }
            Ok(result) => {
                self.result = Some(result);
                self.notice = None;
            }
            Err(QueryError::EmptySelection) => {
                self.result = None;
                self.notice = Some(Notice::Warning(
                    "Please select at least one symptom.".to_string(),
                ));
            }
            Err(e) => {
                self.result = None;
                self.notice = Some(Notice::Warning(e.to_string()));
            }
        }
    }

    /// Symptoms matching the search box, in dataset order.
    pub fn visible_symptoms(&self) -> Vec<String> {
        let Some(ds) = self.cache.dataset() else {
            return Vec::new();
        };
        let needle = self.search.trim().to_lowercase();
        ds.feature_columns()
            .into_iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rare_disease_assistant::data::table::RawTable;

    use super::*;

    fn ready_state() -> AppState {
        let text = "disease,fever,cough,rash\nA,1,0,0\nB,0,1,0\nA,1,1,0\n";
        let table = RawTable::read_batched(text.as_bytes(), 10).unwrap();
        let mut state = AppState::default();
        state.cache.install(Dataset::from_table(table)).unwrap();
        state
    }

    #[test]
    fn diagnose_with_nothing_selected_warns() {
        let mut state = ready_state();
        state.run_diagnosis();
        assert!(matches!(state.notice, Some(Notice::Warning(_))));
        assert!(state.result.is_none());
    }

    #[test]
    fn diagnose_sets_result() {
        let mut state = ready_state();
        state.toggle_symptom("cough");
        state.run_diagnosis();
        let result = state.result.as_ref().unwrap();
        assert_eq!(result.top().unwrap().label, "B");
        assert_eq!(state.notice, None);
    }

    #[test]
    fn no_match_notice() {
        let mut state = ready_state();
        state.toggle_symptom("rash");
        state.run_diagnosis();
        assert_eq!(state.notice, Some(Notice::NoMatch));
    }

    #[test]
    fn toggle_twice_deselects() {
        let mut state = ready_state();
        state.toggle_symptom("fever");
        state.toggle_symptom("fever");
        assert!(state.selected.is_empty());
    }

    #[test]
    fn search_filters_checklist() {
        let mut state = ready_state();
        state.search = "CO".into();
        assert_eq!(state.visible_symptoms(), vec!["cough"]);
    }
}
