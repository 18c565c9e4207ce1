use std::collections::BTreeSet;

use super::facets::FacetIndex;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// FilterSelection – one (possibly partial) choice of the three facets
// ---------------------------------------------------------------------------

/// The three cascading filter fields, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    RegionType,
    StateName,
    RegionName,
}

/// A single filter selection: each field either unset or one chosen value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub region_type: Option<String>,
    pub state_name: Option<String>,
    pub region_name: Option<String>,
}

impl FilterSelection {
    /// Whether all three fields are set (the precondition for `apply`).
    pub fn is_complete(&self) -> bool {
        self.region_type.is_some() && self.state_name.is_some() && self.region_name.is_some()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.region_type.is_none() && self.state_name.is_none() && self.region_name.is_none()
    }
}

// ---------------------------------------------------------------------------
// FilterEngine – pending vs. committed selections + committed row subset
// ---------------------------------------------------------------------------

/// Holds the in-progress (`pending`) and last-applied (`committed`) filter
/// selections, and the row indices matching the committed one.
///
/// The engine does not validate selections against facet membership; the
/// presentation layer only offers values drawn from the [`FacetIndex`].
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    pub pending: FilterSelection,
    pub committed: FilterSelection,
    /// Indices into the dataset matching `committed`; the full dataset while
    /// no selection is committed.
    filtered: Vec<usize>,
}

impl FilterEngine {
    /// Engine for a freshly imported dataset: nothing selected, all rows in.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FilterEngine {
            pending: FilterSelection::default(),
            committed: FilterSelection::default(),
            filtered: (0..dataset.len()).collect(),
        }
    }

    /// Indices of rows matching the committed selection.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// Set one pending field. Choosing a region type resets the dependent
    /// state and region choices; choosing a state resets the region choice.
    pub fn set_pending(&mut self, field: FilterField, value: Option<String>) {
        match field {
            FilterField::RegionType => {
                self.pending.state_name = None;
                self.pending.region_name = None;
                self.pending.region_type = value;
            }
            FilterField::StateName => {
                self.pending.region_name = None;
                self.pending.state_name = value;
            }
            FilterField::RegionName => {
                self.pending.region_name = value;
            }
        }
    }

    /// Commit the pending selection and recompute the filtered subset.
    ///
    /// Hard precondition: all three pending fields must be set. Returns
    /// `false` without changing any state when they are not — the caller is
    /// expected to gate the control that invokes this.
    pub fn apply(&mut self, dataset: &Dataset) -> bool {
        if !self.pending.is_complete() {
            return false;
        }
        self.committed = self.pending.clone();
        self.filtered = Self::matching_indices(dataset, &self.committed);
        log::info!(
            "applied filters {:?}/{:?}/{:?}: {} of {} rows match",
            self.committed.region_type,
            self.committed.state_name,
            self.committed.region_name,
            self.filtered.len(),
            dataset.len()
        );
        true
    }

    /// Reset both selections and restore the full dataset as the result.
    pub fn clear(&mut self, dataset: &Dataset) {
        self.pending = FilterSelection::default();
        self.committed = FilterSelection::default();
        self.filtered = (0..dataset.len()).collect();
    }

    /// States offered for the pending region type: all states when no region
    /// type is chosen, otherwise the cascading subset (empty if unknown).
    pub fn available_state_names<'a>(&self, index: &'a FacetIndex) -> BTreeSet<&'a String> {
        match &self.pending.region_type {
            None => index.state_names.iter().collect(),
            Some(region_type) => index
                .state_names_by_region_type
                .get(region_type)
                .map(|set| set.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Regions offered for the pending state, analogous to
    /// [`Self::available_state_names`].
    pub fn available_region_names<'a>(&self, index: &'a FacetIndex) -> BTreeSet<&'a String> {
        match &self.pending.state_name {
            None => index.region_names.iter().collect(),
            Some(state_name) => index
                .region_names_by_state
                .get(state_name)
                .map(|set| set.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Rows whose three facet fields case-insensitively equal the selection.
    fn matching_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
        let wanted = |field: &Option<String>| field.as_deref().unwrap_or("").to_lowercase();
        let region_type = wanted(&selection.region_type);
        let state_name = wanted(&selection.state_name);
        let region_name = wanted(&selection.region_name);

        dataset
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.region_type().to_lowercase() == region_type
                    && row.state_name().to_lowercase() == state_name
                    && row.region_name().to_lowercase() == region_name
            })
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, RegionRow};
    use std::collections::BTreeMap;

    fn row(region_type: &str, state: &str, region: &str) -> RegionRow {
        let mut fields = BTreeMap::new();
        fields.insert("RegionType".to_string(), region_type.to_string());
        fields.insert("StateName".to_string(), state.to_string());
        fields.insert("RegionName".to_string(), region.to_string());
        RegionRow { fields }
    }

    fn sample_dataset() -> Dataset {
        Dataset {
            columns: vec![
                "RegionType".to_string(),
                "StateName".to_string(),
                "RegionName".to_string(),
            ],
            rows: vec![
                row("city", "California", "Los Angeles"),
                row("city", "Texas", "Austin"),
                row("msa", "Texas", "Austin"),
                row("city", "California", "San Diego"),
            ],
        }
    }

    fn select(engine: &mut FilterEngine, region_type: &str, state: &str, region: &str) {
        engine.set_pending(FilterField::RegionType, Some(region_type.to_string()));
        engine.set_pending(FilterField::StateName, Some(state.to_string()));
        engine.set_pending(FilterField::RegionName, Some(region.to_string()));
    }

    #[test]
    fn selecting_region_type_resets_dependents() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        select(&mut engine, "city", "Texas", "Austin");

        engine.set_pending(FilterField::RegionType, Some("msa".to_string()));
        assert_eq!(engine.pending.region_type.as_deref(), Some("msa"));
        assert_eq!(engine.pending.state_name, None);
        assert_eq!(engine.pending.region_name, None);
    }

    #[test]
    fn selecting_state_resets_region_only() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        select(&mut engine, "city", "Texas", "Austin");

        engine.set_pending(FilterField::StateName, Some("California".to_string()));
        assert_eq!(engine.pending.region_type.as_deref(), Some("city"));
        assert_eq!(engine.pending.state_name.as_deref(), Some("California"));
        assert_eq!(engine.pending.region_name, None);
    }

    #[test]
    fn apply_is_noop_with_incomplete_selection() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        engine.set_pending(FilterField::RegionType, Some("city".to_string()));

        assert!(!engine.apply(&ds));
        assert!(engine.committed.is_empty());
        assert_eq!(engine.filtered_indices().len(), ds.len());
    }

    #[test]
    fn apply_matches_all_three_fields_case_insensitively() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        select(&mut engine, "CITY", "texas", "AUSTIN");

        assert!(engine.apply(&ds));
        // Row 1 is (city, Texas, Austin); row 2 has RegionType "msa" and
        // must be excluded even though state and region match.
        assert_eq!(engine.filtered_indices(), &[1]);
        assert_eq!(engine.committed.region_type.as_deref(), Some("CITY"));
    }

    #[test]
    fn apply_with_no_matches_yields_empty_subset() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        select(&mut engine, "zip", "Texas", "Austin");

        assert!(engine.apply(&ds));
        assert!(engine.filtered_indices().is_empty());
    }

    #[test]
    fn clear_restores_full_dataset_and_empty_selections() {
        let ds = sample_dataset();
        let mut engine = FilterEngine::for_dataset(&ds);
        select(&mut engine, "city", "Texas", "Austin");
        assert!(engine.apply(&ds));

        engine.clear(&ds);
        assert!(engine.pending.is_empty());
        assert!(engine.committed.is_empty());
        assert_eq!(engine.filtered_indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn cascading_option_lists_follow_pending_selection() {
        let ds = sample_dataset();
        let index = crate::data::facets::FacetIndex::build(&ds);
        let mut engine = FilterEngine::for_dataset(&ds);

        // No region type chosen: every state is offered.
        assert_eq!(engine.available_state_names(&index).len(), 2);

        engine.set_pending(FilterField::RegionType, Some("msa".to_string()));
        let states: Vec<&String> = engine.available_state_names(&index).into_iter().collect();
        assert_eq!(states, ["Texas"]);

        engine.set_pending(FilterField::StateName, Some("California".to_string()));
        let regions: Vec<&String> = engine.available_region_names(&index).into_iter().collect();
        assert_eq!(regions, ["Los Angeles", "San Diego"]);

        // Unknown key yields an empty list, not a panic.
        engine.set_pending(FilterField::StateName, Some("Atlantis".to_string()));
        assert!(engine.available_region_names(&index).is_empty());
    }
}
