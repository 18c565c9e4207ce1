use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::FilterField;
use crate::data::model::Dataset;
use crate::data::parser;
use crate::state::AppState;

/// Bundled sample dataset, loadable without picking a file.
const SAMPLE_CSV: &str = include_str!("../../assets/sample-data.csv");

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        if ui
            .add_enabled(!state.loading, egui::Button::new("Load sample data"))
            .clicked()
        {
            load_sample(state);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} regions loaded, {} in filter",
                ds.len(),
                state.engine.filtered_indices().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – cascading filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: region type → state → region combo boxes,
/// plus the Apply / Clear controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Snapshot the option lists so we can mutate state inside the widgets.
    let region_types: Vec<String> = state.facets.region_types.iter().cloned().collect();
    let state_names: Vec<String> = state
        .engine
        .available_state_names(&state.facets)
        .into_iter()
        .cloned()
        .collect();
    let region_names: Vec<String> = state
        .engine
        .available_region_names(&state.facets)
        .into_iter()
        .cloned()
        .collect();

    facet_combo(ui, state, "Region type", FilterField::RegionType, &region_types);
    facet_combo(ui, state, "State", FilterField::StateName, &state_names);
    facet_combo(ui, state, "Region", FilterField::RegionName, &region_names);

    ui.add_space(8.0);

    ui.horizontal(|ui: &mut Ui| {
        // Apply is gated on a complete pending selection; the engine treats
        // an incomplete apply as a hard no-op either way.
        let ready = state.engine.pending.is_complete();
        if ui.add_enabled(ready, egui::Button::new("Apply")).clicked() {
            state.apply_filters();
        }
        if ui.button("Clear").clicked() {
            state.clear_filters();
        }
    });

    if !state.engine.committed.is_empty() {
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!(
                "Showing: {} • {} • {}",
                state.engine.committed.region_type.as_deref().unwrap_or(""),
                state.engine.committed.state_name.as_deref().unwrap_or(""),
                state.engine.committed.region_name.as_deref().unwrap_or(""),
            ))
            .strong(),
        );
    }
}

/// One cascading facet selector. The `(any)` entry unsets the field.
fn facet_combo(
    ui: &mut Ui,
    state: &mut AppState,
    label: &str,
    field: FilterField,
    options: &[String],
) {
    let current = match field {
        FilterField::RegionType => state.engine.pending.region_type.clone(),
        FilterField::StateName => state.engine.pending.state_name.clone(),
        FilterField::RegionName => state.engine.pending.region_name.clone(),
    };

    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .width(ui.available_width())
        .selected_text(current.clone().unwrap_or_else(|| "(any)".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "(any)").clicked() {
                state.set_pending(field, None);
            }
            for option in options {
                if ui
                    .selectable_label(current.as_deref() == Some(option), option)
                    .clicked()
                {
                    state.set_pending(field, Some(option.clone()));
                }
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Import actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing market CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match parser::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} regions with {} columns from {}",
                    dataset.len(),
                    dataset.columns.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => state.import_failed(&e),
        }
    }
}

fn load_sample(state: &mut AppState) {
    state.loading = true;
    match Dataset::parse(SAMPLE_CSV) {
        Ok(dataset) => {
            log::info!("loaded bundled sample with {} regions", dataset.len());
            state.set_dataset(dataset);
        }
        Err(e) => state.import_failed(&e),
    }
}
