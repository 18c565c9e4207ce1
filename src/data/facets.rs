use std::collections::{BTreeMap, BTreeSet};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// FacetIndex – distinct filterable values plus cascading lookups
// ---------------------------------------------------------------------------

/// Read-only index of filter facets derived from a [`Dataset`].
///
/// `BTreeSet`/`BTreeMap` keep every exposed list sorted ascending and free of
/// duplicates. The index is rebuilt in full whenever the dataset is replaced,
/// never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct FacetIndex {
    /// Distinct non-empty `RegionType` values.
    pub region_types: BTreeSet<String>,
    /// Distinct non-empty `StateName` values.
    pub state_names: BTreeSet<String>,
    /// Distinct non-empty `RegionName` values.
    pub region_names: BTreeSet<String>,
    /// RegionType → states that occur with it.
    pub state_names_by_region_type: BTreeMap<String, BTreeSet<String>>,
    /// StateName → regions that occur in it.
    pub region_names_by_state: BTreeMap<String, BTreeSet<String>>,
}

impl FacetIndex {
    /// Build the index in a single pass over all rows.
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = FacetIndex::default();

        for row in &dataset.rows {
            let region_type = row.region_type();
            let state_name = row.state_name();
            let region_name = row.region_name();

            if !region_type.is_empty() {
                index.region_types.insert(region_type.to_string());
            }
            if !state_name.is_empty() {
                index.state_names.insert(state_name.to_string());
            }
            if !region_name.is_empty() {
                index.region_names.insert(region_name.to_string());
            }

            if !region_type.is_empty() && !state_name.is_empty() {
                index
                    .state_names_by_region_type
                    .entry(region_type.to_string())
                    .or_default()
                    .insert(state_name.to_string());
            }
            if !state_name.is_empty() && !region_name.is_empty() {
                index
                    .region_names_by_state
                    .entry(state_name.to_string())
                    .or_default()
                    .insert(region_name.to_string());
            }
        }

        index
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
