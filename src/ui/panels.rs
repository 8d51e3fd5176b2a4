use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::Selection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Edit a copy; the state recomputes only if something changed.
    let mut filters = state.filters.clone();
    let mut reset = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            selection_combo(ui, "State", &dataset.states, &mut filters.state);
            selection_combo(
                ui,
                "Property type",
                &dataset.property_types,
                &mut filters.property_type,
            );
            selection_combo(ui, "Status", &dataset.statuses, &mut filters.status);

            ui.strong("Price range ($)");
            match dataset.price_bounds() {
                Some((lo, hi)) => {
                    let range = lo.floor()..=hi.ceil();
                    ui.add(Slider::new(&mut filters.price_min, range.clone()).text("min"));
                    ui.add(Slider::new(&mut filters.price_max, range).text("max"));
                    if filters.price_min > filters.price_max {
                        filters.price_max = filters.price_min;
                    }
                }
                None => {
                    ui.label("No listing has a readable price.");
                }
            }
            ui.add_space(8.0);

            if ui.button("Reset filters").clicked() {
                reset = true;
            }

            ui.separator();
            ui.label(format!(
                "Showing {} of {} properties",
                state.visible_indices.len(),
                dataset.len()
            ));
        });

    if reset {
        state.reset_filters();
    } else {
        state.set_filters(filters);
    }
}

fn selection_combo(ui: &mut Ui, label: &str, values: &BTreeSet<String>, selection: &mut Selection) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(selection.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selection, Selection::All, "All");
            for v in values {
                ui.selectable_value(selection, Selection::Only(v.clone()), v.as_str());
            }
        });
    ui.add_space(6.0);
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
            let has_source = state.source.is_some();
            if ui.add_enabled(has_source, egui::Button::new("Reload")).clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(has_source, egui::Button::new("Discard cache and reload"))
                .clicked()
            {
                state.force_reload();
                ui.close_menu();
            }
            ui.separator();
            ui.weak(format!("{} file(s) cached", state.cache.len()));
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} listings loaded, {} visible",
                ds.source.display(),
                ds.len(),
                state.visible_indices.len()
            ));
            if ds.skipped_rows > 0 {
                ui.label(
                    RichText::new(format!("({} unreadable rows skipped)", ds.skipped_rows))
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
        .set_title("Open listings CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
