use std::path::PathBuf;

use eligibility_processor::data::params::{ParameterEntry, blank_entries};
use eligibility_processor::{ExportOutcome, ProcessError, Session};

use crate::color::EligibilityColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Uploaded sheets and derived results.
    pub session: Session,

    /// One editable weight / max-mark row per subject, shown after processing.
    pub entries: Vec<ParameterEntry>,

    /// Status / error message shown in the UI.
    pub status: Option<(StatusKind, String)>,

    /// Row and bar colours.
    pub colors: EligibilityColors,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::new(),
            entries: Vec::new(),
            status: None,
            colors: EligibilityColors::default(),
        }
    }
}

impl AppState {
    /// Handle the marks file chosen in the upload dialog (`None` = cancelled).
    pub fn upload_marks(&mut self, path: Option<PathBuf>) {
        match self.session.load_marks(path.as_deref()) {
            Ok(_) => {
                self.entries.clear();
                self.info("Student mark list uploaded successfully.");
            }
            Err(e) => self.fail(e),
        }
    }

    /// Handle the exclusion file chosen in the upload dialog (`None` = cancelled).
    pub fn upload_exclusions(&mut self, path: Option<PathBuf>) {
        match self.session.load_exclusions(path.as_deref()) {
            Ok(_) => {
                self.entries.clear();
                self.info("Exclusion list uploaded successfully.");
            }
            Err(e) => self.fail(e),
        }
    }

    /// Filter the marks and prepare one parameter row per subject.
    pub fn process(&mut self) {
        match self.session.filter() {
            Ok(filtered) => {
                let message = format!(
                    "{} candidates excluded, {} remaining. Enter weights and max marks.",
                    filtered.excluded,
                    filtered.table.len()
                );
                self.entries = blank_entries(&filtered.subjects);
                self.info(&message);
            }
            Err(e) => self.fail(e),
        }
    }

    /// Validate the typed parameters and score every candidate.
    pub fn submit(&mut self) {
        match self.session.score(&self.entries) {
            Ok(scored) => {
                let message = format!(
                    "Final marks calculated: {} of {} candidates eligible.",
                    scored.eligible_count(),
                    scored.len()
                );
                self.info(&message);
            }
            Err(e) => self.fail(e),
        }
    }

    /// Handle the destination chosen in the save dialog (`None` = cancelled).
    pub fn save(&mut self, destination: Option<PathBuf>) {
        match self.session.export(destination.as_deref()) {
            Ok(ExportOutcome::Saved(path)) => {
                self.info(&format!(
                    "Final eligibility list created successfully! Saved as {}",
                    path.display()
                ));
            }
            Ok(ExportOutcome::Cancelled) => {
                self.status = Some((
                    StatusKind::Warning,
                    "No file was selected. The final eligibility list was not saved.".to_string(),
                ));
            }
            Err(e) => self.fail(e),
        }
    }

    /// Discard every upload and result.
    pub fn reset(&mut self) {
        *self = AppState::default();
        log::info!("Session reset");
    }

    fn info(&mut self, message: &str) {
        self.status = Some((StatusKind::Info, message.to_string()));
    }

    fn fail(&mut self, error: ProcessError) {
        log::error!("{error}");
        self.status = Some((StatusKind::Error, format!("Error: {error}")));
    }
}
