use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Listing;
use crate::state::AppState;

const COLUMNS: [&str; 12] = [
    "Price",
    "Address",
    "City",
    "State",
    "Bedrooms",
    "Bathrooms",
    "Area (Sqft)",
    "Year Built",
    "Days on Market",
    "Property Type",
    "Status",
    "Listing Agent",
];

/// Source text of the displayed columns, in [`COLUMNS`] order.
fn cells(l: &Listing) -> [&str; 12] {
    let r = &l.raw;
    [
        &r.price,
        &r.address,
        &r.city,
        &r.state,
        &r.bedrooms,
        &r.bathrooms,
        &r.area,
        &r.year_built,
        &r.days_on_market,
        &r.property_type,
        &r.status,
        &r.listing_agent,
    ]
}

// ---------------------------------------------------------------------------
// Detail table
// ---------------------------------------------------------------------------

/// The first `table_rows` visible listings as they appear in the source file.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&Listing> = state.visible().take(state.table_rows).collect();
    ui.heading("Detail data");
    if rows.is_empty() {
        ui.weak("No rows match the current filters.");
        return;
    }
    if state.visible_indices.len() > rows.len() {
        ui.weak(format!(
            "First {} of {} matching rows",
            rows.len(),
            state.visible_indices.len()
        ));
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), COLUMNS.len())
            .header(20.0, |mut header| {
                for name in COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let listing = rows[row.index()];
                    for text in cells(listing) {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
