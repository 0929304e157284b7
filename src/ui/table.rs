use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use eligibility_processor::data::model::{ELIGIBILITY_COLUMN, GRADE_COLUMN};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Show the scored list, or the filtered marks while parameters are pending.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    if let Some(scored) = state.session.scored() {
        let mut headers = scored.headers.clone();
        headers.push(GRADE_COLUMN.to_string());
        headers.push(ELIGIBILITY_COLUMN.to_string());

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in &headers {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, scored.len(), |mut row| {
                    let record = &scored.records[row.index()];
                    let color = state.colors.color_for(record.eligibility);
                    for cell in &record.cells {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                    row.col(|ui| {
                        ui.label(format!("{:.2}", record.grade));
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(record.eligibility.label()).color(color));
                    });
                });
            });
        return;
    }

    if let Some(filtered) = state.session.filtered() {
        let table = &filtered.table;
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), table.headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in &table.headers {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    for cell in &table.rows[row.index()] {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
        return;
    }

    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Upload the marks and exclusion files  (File → Upload…)");
    });
}
