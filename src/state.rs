use std::collections::BTreeSet;
use std::path::Path;

use crate::analysis::dispatch::{evaluate, Action, AnalysisResult};
use crate::config::DatasetPaths;
use crate::data::filter::TypeStrainFilter;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded datasets.
    pub session: Session,

    /// The two type-strain checkboxes.
    pub filter: TypeStrainFilter,

    /// Analysis buttons currently switched on, in button order.
    pub active: BTreeSet<Action>,

    /// Results for the current filter and active buttons (cached).
    pub results: Vec<AnalysisResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let mut state = Self {
            session,
            filter: TypeStrainFilter::default(),
            active: BTreeSet::new(),
            results: Vec::new(),
            status_message: None,
        };
        state.recompute();
        state
    }

    /// Recompute every result from scratch after any change.
    pub fn recompute(&mut self) {
        let actions: Vec<Action> = self.active.iter().copied().collect();
        match evaluate(&self.session, &self.filter, &actions) {
            Ok(results) => {
                self.results = results;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.results.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_filter(&mut self, filter: TypeStrainFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.recompute();
        }
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.active.contains(&action)
    }

    /// Switch one analysis button on or off.
    pub fn toggle_action(&mut self, action: Action) {
        if !self.active.remove(&action) {
            self.active.insert(action);
        }
        self.recompute();
    }

    pub fn clear_actions(&mut self) {
        self.active.clear();
        self.recompute();
    }

    /// Load `prod.csv`, `util.csv` and `anti.csv` from another directory.
    /// On failure the current session stays in place.
    pub fn reload_from_dir(&mut self, dir: &Path) {
        let mut config = self.session.config.clone();
        config.datasets = DatasetPaths::in_dir(dir);

        match Session::load(config) {
            Ok(session) => {
                log::info!("Reloaded datasets from {}", dir.display());
                self.session = session;
                self.recompute();
            }
            Err(e) => {
                log::error!("Failed to reload datasets: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dispatch::{AnalysisKind, Payload, STATISTICS_HEADING};
    use crate::config::DashboardConfig;
    use crate::data::model::tests::table;
    use crate::data::model::Dataset;

    fn state() -> AppState {
        let prod = table(&["m"], &[(1, "A", 1, vec![2.0]), (2, "B", 0, vec![3.0])]);
        AppState::new(Session::from_tables(
            DashboardConfig::default(),
            prod.clone(),
            prod.clone(),
            prod,
        ))
    }

    #[test]
    fn statistics_shown_from_the_start() {
        let s = state();
        assert_eq!(s.results.len(), 1);
        assert_eq!(s.results[0].heading, STATISTICS_HEADING);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn several_buttons_can_be_active() {
        let mut s = state();
        let count = Action::new(Dataset::Production, AnalysisKind::MetaboliteCount);
        let species = Action::new(Dataset::Antimicrobial, AnalysisKind::TopSpecies);
        s.toggle_action(species);
        s.toggle_action(count);
        assert_eq!(s.results.len(), 3);
        // Button order, not press order.
        assert_eq!(s.results[1].heading, "Total Production Metabolite Count");

        s.toggle_action(count);
        assert!(!s.is_active(count));
        assert_eq!(s.results.len(), 2);

        s.clear_actions();
        assert_eq!(s.results.len(), 1);
    }

    #[test]
    fn filter_change_recomputes_results() {
        let mut s = state();
        let count = Action::new(Dataset::Production, AnalysisKind::MetaboliteCount);
        s.toggle_action(count);
        s.set_filter(TypeStrainFilter {
            show_type_strain: false,
            show_non_type_strain: true,
        });
        match &s.results[1].payload {
            Payload::Sums(sums) => assert_eq!(sums.get("m"), Some(&3.0)),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn failed_reload_keeps_the_session() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        s.reload_from_dir(dir.path());
        assert!(s.status_message.is_some());
        assert_eq!(s.session.table(Dataset::Production).len(), 2);
    }
}
