use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// Columns that must be present in the CSV header for an import to succeed.
pub const REQUIRED_COLUMNS: [&str; 4] = ["RegionID", "RegionName", "RegionType", "StateName"];

/// Identity/descriptive columns. Everything outside this set is treated as a
/// time-series value column (typically a date-period housing value).
pub const IDENTITY_COLUMNS: [&str; 9] = [
    "RegionID",
    "SizeRank",
    "RegionName",
    "RegionType",
    "StateName",
    "State",
    "City",
    "Metro",
    "CountyName",
];

/// Whether a column name is an identity column rather than a value column.
pub fn is_identity_column(name: &str) -> bool {
    IDENTITY_COLUMNS.contains(&name)
}

// ---------------------------------------------------------------------------
// RegionRow – one row of the imported CSV
// ---------------------------------------------------------------------------

/// A single region record: column name → raw string cell.
///
/// Every header column is present in `fields`; cells missing from a short
/// row default to the empty string at parse time.
#[derive(Debug, Clone, Default)]
pub struct RegionRow {
    pub fields: BTreeMap<String, String>,
}

impl RegionRow {
    /// Cell value for a column, or `""` if the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn region_type(&self) -> &str {
        self.get("RegionType")
    }

    pub fn state_name(&self) -> &str {
        self.get("StateName")
    }

    pub fn region_name(&self) -> &str {
        self.get("RegionName")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete imported table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Row order is file order; the dataset is replaced
/// wholesale on each successful import and never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Header column names in file order.
    pub columns: Vec<String>,
    /// All data rows.
    pub rows: Vec<RegionRow>,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
