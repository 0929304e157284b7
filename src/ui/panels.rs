use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::state::{AppState, StatusKind};

const GUIDELINES: &str = "\
1. Upload the student marks file (Index Number, Name, then one column per subject).
2. Upload the exclusion list file (must contain an Index Number column).
3. After uploading both files, click 'Process'.
4. Enter the weight and maximum marks for each subject, then click 'Submit'.
5. Grades are calculated and candidates with 40 or more are marked Eligible.
6. Save the final eligibility list to your desired location.";

// ---------------------------------------------------------------------------
// Left side panel – guidelines and subject parameters
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Guidelines");
    ui.separator();
    ui.label(GUIDELINES);
    ui.add_space(8.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.session.is_ready(), egui::Button::new("Process"))
            .clicked()
        {
            state.process();
        }
        if ui
            .add_enabled(!state.entries.is_empty(), egui::Button::new("Submit"))
            .clicked()
        {
            state.submit();
        }
    });
    ui.separator();

    if state.entries.is_empty() {
        ui.label("Upload both files and click 'Process' to enter subject weights.");
        return;
    }

    ui.strong("Subject parameters");
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("subject_parameters")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    ui.strong("Weight");
                    ui.strong("Max marks");
                    ui.end_row();

                    for entry in &mut state.entries {
                        ui.label(&entry.subject);
                        ui.add(TextEdit::singleline(&mut entry.weight).desired_width(70.0));
                        ui.add(TextEdit::singleline(&mut entry.max_mark).desired_width(70.0));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload Student Marks…").clicked() {
                state.upload_marks(open_file_dialog("Upload Student Marks File"));
                ui.close_menu();
            }
            if ui.button("Upload Exclusion List…").clicked() {
                state.upload_exclusions(open_file_dialog("Upload Exclusion List File"));
                ui.close_menu();
            }
            ui.separator();
            let can_save = state.session.scored().is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save Eligibility List…"))
                .clicked()
            {
                state.save(save_file_dialog());
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reset").clicked() {
                state.reset();
                ui.close_menu();
            }
        });

        ui.separator();

        let session = &state.session;
        let marks = session.marks().map_or("—".to_string(), |m| m.table.len().to_string());
        let exclusions = session
            .exclusions()
            .map_or("—".to_string(), |e| e.table.len().to_string());
        ui.label(format!("Marks rows: {marks}   Exclusion rows: {exclusions}"));

        if let Some(scored) = session.scored() {
            ui.separator();
            ui.label(format!(
                "{} scored, {} eligible",
                scored.len(),
                scored.eligible_count()
            ));
        }

        if let Some((kind, msg)) = &state.status {
            ui.separator();
            let color = match kind {
                StatusKind::Info => Color32::LIGHT_GREEN,
                StatusKind::Warning => Color32::YELLOW,
                StatusKind::Error => Color32::RED,
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel / OpenDocument", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

pub fn save_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Final Eligibility List")
        .set_file_name("eligibility_list.xlsx")
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file()
}
