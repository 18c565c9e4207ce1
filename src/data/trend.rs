use super::series::TimeSeries;

// ---------------------------------------------------------------------------
// Trend metrics over a single time series
// ---------------------------------------------------------------------------

/// Period-over-period movement for one period (the series' first point has
/// no predecessor and therefore no entry here).
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodChange {
    pub period: String,
    /// The period's own value.
    pub value: f64,
    /// Absolute change from the previous period.
    pub change: f64,
    /// Percent change from the previous period; 0 when the previous value
    /// is not positive.
    pub change_percent: f64,
}

/// Aggregate trend statistics.
///
/// Aggregates are computed only over changes whose own period value is
/// positive, so zero-filled gaps do not skew the averages.
#[derive(Debug, Clone, Default)]
pub struct TrendMetrics {
    /// All per-period changes, including zero-valued periods (for display).
    pub changes: Vec<PeriodChange>,
    pub avg_change_percent: f64,
    /// Share of included periods with a positive percent change, 0–100.
    pub likelihood_of_increase: f64,
    /// Population standard deviation of included percent changes.
    pub volatility: f64,
    /// Mean percent change of the last (at most) three included periods.
    pub forecast_change_percent: f64,
    /// Last raw value projected one period ahead by the forecast percent.
    pub forecast_value: f64,
    pub positive_changes: usize,
    pub negative_changes: usize,
    /// Number of changes the aggregates were computed over.
    pub total_changes: usize,
}

/// Analyze a time series; `None` when there are fewer than two points.
pub fn analyze(series: &TimeSeries) -> Option<TrendMetrics> {
    if series.len() < 2 {
        return None;
    }

    let changes: Vec<PeriodChange> = series
        .points
        .windows(2)
        .map(|pair| {
            let prev = pair[0].value;
            let current = &pair[1];
            let change = current.value - prev;
            let change_percent = if prev > 0.0 { change / prev * 100.0 } else { 0.0 };
            PeriodChange {
                period: current.period.clone(),
                value: current.value,
                change,
                change_percent,
            }
        })
        .collect();

    let included: Vec<&PeriodChange> = changes.iter().filter(|c| c.value > 0.0).collect();
    let count = included.len();

    let mean = |percents: &[f64]| -> f64 {
        if percents.is_empty() {
            0.0
        } else {
            percents.iter().sum::<f64>() / percents.len() as f64
        }
    };

    let percents: Vec<f64> = included.iter().map(|c| c.change_percent).collect();
    let avg_change_percent = mean(&percents);

    let positive_changes = included.iter().filter(|c| c.change_percent > 0.0).count();
    let negative_changes = included.iter().filter(|c| c.change_percent < 0.0).count();
    let likelihood_of_increase = if count > 0 {
        positive_changes as f64 / count as f64 * 100.0
    } else {
        0.0
    };

    // Population variance, not Bessel-corrected.
    let volatility = if count > 0 {
        let variance = percents
            .iter()
            .map(|p| (p - avg_change_percent).powi(2))
            .sum::<f64>()
            / count as f64;
        variance.sqrt()
    } else {
        0.0
    };

    let recent_start = count.saturating_sub(3);
    let forecast_change_percent = mean(&percents[recent_start..]);
    let forecast_value = series.last_value() * (1.0 + forecast_change_percent / 100.0);

    Some(TrendMetrics {
        changes,
        avg_change_percent,
        likelihood_of_increase,
        volatility,
        forecast_change_percent,
        forecast_value,
        positive_changes,
        negative_changes,
        total_changes: count,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
