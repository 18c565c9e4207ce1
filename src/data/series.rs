use super::filter::FilterSelection;
use super::model::{is_identity_column, Dataset, RegionRow};

// ---------------------------------------------------------------------------
// TimeSeries – ordered per-period values for one selected region
// ---------------------------------------------------------------------------

/// One value-column measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    /// The column name, typically a date-period label like `2020-01-31`.
    pub period: String,
    pub value: f64,
}

/// The ordered series for the committed region.
///
/// Points are ordered by lexicographic column-name sort, which is
/// chronological only when period labels are `YYYY-MM-DD`-style. That is an
/// assumption inherited from the data format, not a checked guarantee.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    pub region_name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// The most recent value, or 0 for an empty series.
    pub fn last_value(&self) -> f64 {
        self.points.last().map(|p| p.value).unwrap_or(0.0)
    }
}

/// Assemble the time series for the committed region from the filtered rows.
///
/// Returns `None` when the filtered subset is empty. Value columns are every
/// non-identity column of the first result row. The series row is the first
/// one whose `RegionName` equals the committed region name; when none
/// matches, every point is zero-filled rather than failing. Non-numeric
/// cells likewise coerce to 0 (silent-data policy kept from the source
/// format; a future revision may want an explicit missing sentinel).
pub fn extract(
    dataset: &Dataset,
    filtered: &[usize],
    committed: &FilterSelection,
) -> Option<TimeSeries> {
    let first = dataset.rows.get(*filtered.first()?)?;
    let region_name = committed.region_name.clone().unwrap_or_default();

    // BTreeMap iteration gives the lexicographic column order.
    let value_columns: Vec<&String> = first
        .fields
        .keys()
        .filter(|name| !is_identity_column(name))
        .collect();

    let selected: Option<&RegionRow> = filtered
        .iter()
        .filter_map(|&i| dataset.rows.get(i))
        .find(|row| row.region_name() == region_name);

    let points = value_columns
        .into_iter()
        .map(|column| TimeSeriesPoint {
            period: column.clone(),
            value: selected.map_or(0.0, |row| coerce_numeric(row.get(column))),
        })
        .collect();

    Some(TimeSeries {
        region_name,
        points,
    })
}

/// Parse a cell as `f64`, zero-filling anything unparseable.
fn coerce_numeric(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    fn sample_dataset() -> Dataset {
        let text = "\
RegionID,RegionName,RegionType,StateName,SizeRank,2020-02-29,2020-01-31,2020-03-31
1,Los Angeles,city,California,10,110,100,abc
2,San Diego,city,California,20,210,200,220
";
        Dataset::parse(text).unwrap()
    }

    fn committed(region: &str) -> FilterSelection {
        FilterSelection {
            region_type: Some("city".to_string()),
            state_name: Some("California".to_string()),
            region_name: Some(region.to_string()),
        }
    }

    #[test]
    fn empty_result_set_yields_none() {
        let ds = sample_dataset();
        assert!(extract(&ds, &[], &committed("Los Angeles")).is_none());
    }

    #[test]
    fn points_are_in_lexicographic_period_order() {
        let ds = sample_dataset();
        let series = extract(&ds, &[0, 1], &committed("Los Angeles")).unwrap();
        let periods: Vec<&str> = series.points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, ["2020-01-31", "2020-02-29", "2020-03-31"]);
    }

    #[test]
    fn identity_columns_are_excluded() {
        let ds = sample_dataset();
        let series = extract(&ds, &[0], &committed("Los Angeles")).unwrap();
        assert!(series.points.iter().all(|p| !p.period.contains("Rank")));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn non_numeric_cells_coerce_to_zero() {
        let ds = sample_dataset();
        let series = extract(&ds, &[0, 1], &committed("Los Angeles")).unwrap();
        assert_eq!(series.points[0].value, 100.0);
        assert_eq!(series.points[1].value, 110.0);
        // "abc" zero-fills instead of erroring.
        assert_eq!(series.points[2].value, 0.0);
    }

    #[test]
    fn unmatched_region_zero_fills_every_point() {
        let ds = sample_dataset();
        let series = extract(&ds, &[0, 1], &committed("Sacramento")).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.values().all(|v| v == 0.0));
    }

    #[test]
    fn first_matching_row_wins_on_duplicates() {
        let text = "\
RegionID,RegionName,RegionType,StateName,2020-01-31
1,Austin,city,Texas,100
2,Austin,city,Texas,999
";
        let ds = Dataset::parse(text).unwrap();
        let sel = FilterSelection {
            region_type: Some("city".to_string()),
            state_name: Some("Texas".to_string()),
            region_name: Some("Austin".to_string()),
        };
        let series = extract(&ds, &[0, 1], &sel).unwrap();
        assert_eq!(series.points[0].value, 100.0);
    }
}
