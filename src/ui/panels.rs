use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use salary_story::stats::MedianMethod;
use salary_story::{CategoricalField, NumericField};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – chart settings and filter widgets
// ---------------------------------------------------------------------------

/// Render the left settings/filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    let mut changed = false;

    ui.strong("Group by");
    changed |= categorical_combo(ui, "group_by", &mut state.settings.group_field);

    ui.strong("Color by");
    let mut color_field = state.settings.color_field;
    if categorical_combo(ui, "color_by", &mut color_field) {
        state.set_color_field(color_field);
    }

    ui.strong("Scatter axes");
    changed |= numeric_combo(ui, "scatter_x", &mut state.settings.scatter_x);
    changed |= numeric_combo(ui, "scatter_y", &mut state.settings.scatter_y);

    let mut interpolated = state.settings.median_method == MedianMethod::Interpolated;
    if ui
        .checkbox(&mut interpolated, "Interpolated median")
        .on_hover_text("Average the two middle values for even counts")
        .changed()
    {
        state.settings.median_method = if interpolated {
            MedianMethod::Interpolated
        } else {
            MedianMethod::MiddleIndex
        };
        changed = true;
    }

    if changed {
        state.refresh();
    }

    ui.add_space(8.0);
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let category_values = dataset.category_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (field, all_values) in &category_values {
                let field = *field;
                let n_selected = state.filters.get(&field).map_or(0, |s| s.len());
                let header_text = format!("{field}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        for &label in all_values {
                            let mut checked = state
                                .filters
                                .get(&field)
                                .is_some_and(|s| s.contains(label));

                            let mut text = RichText::new(label);
                            if state.color_map.field == field {
                                text = text.color(state.color_map.color_for(label));
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(field, label);
                            }
                        }
                    });
            }
        });
}

fn categorical_combo(ui: &mut Ui, id: &str, current: &mut CategoricalField) -> bool {
    let before = *current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for field in CategoricalField::ALL {
                ui.selectable_value(current, field, field.label());
            }
        });
    *current != before
}

fn numeric_combo(ui: &mut Ui, id: &str, current: &mut NumericField) -> bool {
    let before = *current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for field in NumericField::ALL {
                ui.selectable_value(current, field, field.label());
            }
        });
    *current != before
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.settings.tab, tab, tab.label());
        }
    });
}

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

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
            let imputed = ds.imputed_count();
            if imputed > 0 {
                ui.label(
                    RichText::new(format!("{imputed} with defaulted categories"))
                        .color(Color32::YELLOW),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match salary_story::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.set_load_error(format!("Error: {e:#}"));
            }
        }
    }
}
