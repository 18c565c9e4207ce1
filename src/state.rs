use crate::data::facets::FacetIndex;
use crate::data::filter::{FilterEngine, FilterField};
use crate::data::model::Dataset;
use crate::data::parser::ImportError;
use crate::data::series::{self, TimeSeries};
use crate::data::trend::{self, TrendMetrics};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which analysis tab is shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisTab {
    #[default]
    Timeline,
    Values,
    Trend,
}

/// Derived analysis snapshot for the committed selection.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub series: TimeSeries,
    /// `None` when the series has fewer than two points.
    pub trend: Option<TrendMetrics>,
}

/// The full UI state, independent of rendering.
///
/// All derived structures (facets, filtered subset, analysis) are rebuilt
/// wholesale on every import or apply; readers never see partial state.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until the user imports a file).
    pub dataset: Option<Dataset>,

    /// Facet index over the current dataset.
    pub facets: FacetIndex,

    /// Pending/committed filter selections and the committed row subset.
    pub engine: FilterEngine,

    /// Series + trend for the committed selection, if one is applied.
    pub analysis: Option<Analysis>,

    pub active_tab: AnalysisTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether an import is in progress; gates re-entrant imports at the
    /// presentation layer only.
    pub loading: bool,
}

impl AppState {
    /// Ingest a newly imported dataset, replacing all derived structures.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.facets = FacetIndex::build(&dataset);
        self.engine = FilterEngine::for_dataset(&dataset);
        self.analysis = None;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Record a failed import; the previous dataset stays untouched.
    pub fn import_failed(&mut self, err: &ImportError) {
        log::error!("import failed: {err}");
        self.status_message = Some(format!("Error: {err}"));
        self.loading = false;
    }

    pub fn set_pending(&mut self, field: FilterField, value: Option<String>) {
        self.engine.set_pending(field, value);
    }

    /// Apply the pending selection; recomputes the analysis on success.
    pub fn apply_filters(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        if self.engine.apply(dataset) {
            self.analysis = Self::analyze(dataset, &self.engine);
        }
    }

    /// Reset both selections and drop the analysis.
    pub fn clear_filters(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.engine.clear(dataset);
        }
        self.analysis = None;
    }

    fn analyze(dataset: &Dataset, engine: &FilterEngine) -> Option<Analysis> {
        let series = series::extract(dataset, engine.filtered_indices(), &engine.committed)?;
        let trend = trend::analyze(&series);
        Some(Analysis { series, trend })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state() -> AppState {
        let text = "\
RegionID,RegionName,RegionType,StateName,2020-01,2020-02
1,LA,city,CA,100,110
2,Austin,city,TX,200,220
";
        let mut state = AppState::default();
        state.set_dataset(Dataset::parse(text).unwrap());
        state
    }

    #[test]
    fn import_replaces_all_derived_structures() {
        let state = loaded_state();
        assert_eq!(state.facets.region_names.len(), 2);
        assert_eq!(state.engine.filtered_indices().len(), 2);
        assert!(state.analysis.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn apply_builds_analysis_for_committed_region() {
        let mut state = loaded_state();
        state.set_pending(FilterField::RegionType, Some("city".to_string()));
        state.set_pending(FilterField::StateName, Some("CA".to_string()));
        state.set_pending(FilterField::RegionName, Some("LA".to_string()));
        state.apply_filters();

        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.series.points.len(), 2);
        let trend = analysis.trend.as_ref().unwrap();
        assert!((trend.forecast_value - 121.0).abs() < 1e-9);
    }

    #[test]
    fn incomplete_apply_leaves_analysis_unset() {
        let mut state = loaded_state();
        state.set_pending(FilterField::RegionType, Some("city".to_string()));
        state.apply_filters();
        assert!(state.analysis.is_none());
        assert!(state.engine.committed.is_empty());
    }

    #[test]
    fn clear_drops_analysis_and_restores_all_rows() {
        let mut state = loaded_state();
        state.set_pending(FilterField::RegionType, Some("city".to_string()));
        state.set_pending(FilterField::StateName, Some("TX".to_string()));
        state.set_pending(FilterField::RegionName, Some("Austin".to_string()));
        state.apply_filters();
        assert!(state.analysis.is_some());

        state.clear_filters();
        assert!(state.analysis.is_none());
        assert_eq!(state.engine.filtered_indices().len(), 2);
    }

    #[test]
    fn failed_import_keeps_previous_dataset() {
        let mut state = loaded_state();
        state.loading = true;
        let err = Dataset::parse("RegionID\n1\n").unwrap_err();
        state.import_failed(&err);

        assert!(state.dataset.is_some());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert!(state.status_message.as_ref().unwrap().starts_with("Error:"));
        assert!(!state.loading);
    }
}
