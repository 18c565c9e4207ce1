/// Data layer: the full import → analysis pipeline, UI-free.
///
/// Architecture:
/// ```text
///        .csv text
///            │
///            ▼
///      ┌──────────┐
///      │  parser   │  validate header, parse rows → Dataset
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  facets   │  distinct values + cascading maps → FacetIndex
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  filter   │  pending/committed selections → row subset
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  series   │  value columns of one region → TimeSeries
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  trend    │  deltas, volatility, forecast → TrendMetrics
///      └──────────┘
/// ```
///
/// Every stage is a pure function over its input; a new import replaces the
/// dataset and all derived structures wholesale.
pub mod facets;
pub mod filter;
pub mod model;
pub mod parser;
pub mod series;
pub mod trend;

#[cfg(test)]
mod tests {
    use super::filter::{FilterEngine, FilterField};
    use super::model::Dataset;
    use super::{series, trend};

    /// Full pipeline: import → select (city, CA, LA) → apply → series → trend.
    #[test]
    fn pipeline_from_csv_to_forecast() {
        let text = "\
RegionID,RegionName,RegionType,StateName,2020-01,2020-02
1,LA,city,CA,100,110
";
        let dataset = Dataset::parse(text).unwrap();
        let mut engine = FilterEngine::for_dataset(&dataset);
        engine.set_pending(FilterField::RegionType, Some("city".to_string()));
        engine.set_pending(FilterField::StateName, Some("CA".to_string()));
        engine.set_pending(FilterField::RegionName, Some("LA".to_string()));
        assert!(engine.apply(&dataset));

        let ts = series::extract(&dataset, engine.filtered_indices(), &engine.committed).unwrap();
        assert_eq!(ts.points.len(), 2);
        assert_eq!(ts.points[0].period, "2020-01");
        assert_eq!(ts.points[0].value, 100.0);
        assert_eq!(ts.points[1].value, 110.0);

        let metrics = trend::analyze(&ts).unwrap();
        assert_eq!(metrics.changes.len(), 1);
        assert!((metrics.changes[0].change - 10.0).abs() < 1e-9);
        assert!((metrics.avg_change_percent - 10.0).abs() < 1e-9);
        assert!((metrics.likelihood_of_increase - 100.0).abs() < 1e-9);
        assert!((metrics.forecast_value - 121.0).abs() < 1e-9);
    }
}
