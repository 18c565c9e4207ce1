use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ChartColors;
use crate::data::trend::TrendMetrics;
use crate::state::{Analysis, AnalysisTab, AppState};

// ---------------------------------------------------------------------------
// Central panel – analysis tabs
// ---------------------------------------------------------------------------

/// Render the central analysis area: tab bar plus the active tab's charts.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Import a CSV to get started  (File → Open…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for (tab, label) in [
            (AnalysisTab::Timeline, "Timeline"),
            (AnalysisTab::Values, "Values"),
            (AnalysisTab::Trend, "Trend"),
        ] {
            if ui
                .selectable_label(state.active_tab == tab, label)
                .clicked()
            {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a region type, state, and region, then Apply");
        });
        return;
    };

    let colors = ChartColors::default();
    match state.active_tab {
        AnalysisTab::Timeline => timeline_tab(ui, analysis, &colors),
        AnalysisTab::Values => values_tab(ui, analysis, &colors),
        AnalysisTab::Trend => trend_tab(ui, analysis, &colors),
    }
}

// ---------------------------------------------------------------------------
// Timeline tab – value line chart + per-period table
// ---------------------------------------------------------------------------

fn timeline_tab(ui: &mut Ui, analysis: &Analysis, colors: &ChartColors) {
    let series = &analysis.series;
    ui.strong(format!("Timeline – {}", series.region_name));

    let points: PlotPoints = series
        .values()
        .enumerate()
        .map(|(i, v)| [i as f64, v])
        .collect();

    Plot::new("timeline_plot")
        .legend(Legend::default())
        .x_axis_label("Period")
        .y_axis_label("Value")
        .height(ui.available_height() * 0.55)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(&series.region_name)
                    .color(colors.value_line)
                    .width(2.0),
            );
        });

    ui.add_space(8.0);
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("timeline_table")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Period");
                    ui.strong("Value");
                    ui.strong("Change");
                    ui.end_row();

                    let mut prev: Option<f64> = None;
                    for point in &series.points {
                        ui.label(&point.period);
                        ui.label(format_usd(point.value));
                        match prev {
                            None => {
                                ui.label("–");
                            }
                            Some(p) => {
                                let change = point.value - p;
                                let percent = if p > 0.0 { change / p * 100.0 } else { 0.0 };
                                let color = if change >= 0.0 {
                                    colors.increase
                                } else {
                                    colors.decrease
                                };
                                ui.label(
                                    RichText::new(format!(
                                        "{}{} ({percent:+.1}%)",
                                        if change >= 0.0 { "+" } else { "" },
                                        format_usd(change)
                                    ))
                                    .color(color),
                                );
                            }
                        }
                        prev = Some(point.value);
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Values tab – per-period bars + summary statistics
// ---------------------------------------------------------------------------

fn values_tab(ui: &mut Ui, analysis: &Analysis, colors: &ChartColors) {
    let series = &analysis.series;
    ui.strong(format!("Value analysis – {}", series.region_name));

    let bars: Vec<Bar> = series
        .values()
        .enumerate()
        .map(|(i, v)| Bar::new(i as f64, v).fill(colors.value_bars))
        .collect();

    Plot::new("values_plot")
        .x_axis_label("Period")
        .y_axis_label("Value")
        .height(ui.available_height() * 0.6)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&series.region_name));
        });

    ui.add_space(8.0);

    // Summary statistics over periods with a positive value only, so
    // zero-filled gaps do not drag the numbers down.
    let positive: Vec<f64> = series.values().filter(|v| *v > 0.0).collect();
    let latest = series.last_value();
    let average = if positive.is_empty() {
        0.0
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64
    };
    let min = positive.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = positive.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if positive.is_empty() { 0.0 } else { max - min };

    egui::Grid::new("value_stats").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Latest value");
        ui.strong(format_usd(latest));
        ui.end_row();
        ui.label("Average");
        ui.strong(format_usd(average));
        ui.end_row();
        ui.label("Range");
        ui.strong(format_usd(range));
        ui.end_row();
    });
}

// ---------------------------------------------------------------------------
// Trend tab – percent-change bars, metrics, forecast summary
// ---------------------------------------------------------------------------

fn trend_tab(ui: &mut Ui, analysis: &Analysis, colors: &ChartColors) {
    let Some(trend) = &analysis.trend else {
        ui.label("Need at least 2 data points to calculate trends.");
        return;
    };
    ui.strong(format!("Trend analysis – {}", analysis.series.region_name));

    let bars: Vec<Bar> = trend
        .changes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let fill = if c.change_percent >= 0.0 {
                colors.increase
            } else {
                colors.decrease
            };
            Bar::new(i as f64, c.change_percent).fill(fill)
        })
        .collect();

    Plot::new("trend_plot")
        .x_axis_label("Period")
        .y_axis_label("Change %")
        .height(ui.available_height() * 0.5)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Change %"));
        });

    ui.add_space(8.0);
    trend_metrics_grid(ui, trend, colors);
    ui.add_space(8.0);
    forecast_summary(ui, analysis, trend, colors);
}

fn trend_metrics_grid(ui: &mut Ui, trend: &TrendMetrics, colors: &ChartColors) {
    let signed_color = |v: f64| if v >= 0.0 { colors.increase } else { colors.decrease };

    egui::Grid::new("trend_metrics").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Likelihood of increase");
        ui.strong(format!("{:.1}%", trend.likelihood_of_increase));
        ui.end_row();

        ui.label("Avg change per period");
        ui.label(
            RichText::new(format!("{:+.1}%", trend.avg_change_percent))
                .strong()
                .color(signed_color(trend.avg_change_percent)),
        );
        ui.end_row();

        ui.label("Volatility");
        ui.strong(format!("{:.1}%", trend.volatility));
        ui.end_row();

        ui.label("Next period forecast");
        ui.label(
            RichText::new(format!("{:+.1}%", trend.forecast_change_percent))
                .strong()
                .color(signed_color(trend.forecast_change_percent)),
        );
        ui.end_row();
    });
}

fn forecast_summary(ui: &mut Ui, analysis: &Analysis, trend: &TrendMetrics, colors: &ChartColors) {
    ui.strong("Forecast summary");
    egui::Grid::new("forecast_summary").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Current value");
        ui.strong(format_usd(analysis.series.last_value()));
        ui.end_row();

        ui.label("Predicted next value");
        ui.label(
            RichText::new(format_usd(trend.forecast_value))
                .strong()
                .color(colors.forecast),
        );
        ui.end_row();

        ui.label("Historical pattern");
        ui.label(format!(
            "{} increases, {} decreases over {} periods",
            trend.positive_changes, trend.negative_changes, trend.total_changes
        ));
        ui.end_row();
    });
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `1234567.8` → `$1,234,568`.
fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${grouped}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::format_usd;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(950.4), "$950");
        assert_eq!(format_usd(1234567.8), "$1,234,568");
        assert_eq!(format_usd(-2500.0), "-$2,500");
    }
}
