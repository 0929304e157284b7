use std::path::{Path, PathBuf};

use crate::data::export::{resolve_destination, write_table};
use crate::data::filter::{FilteredTable, exclusion_set, filter_excluded};
use crate::data::loader::load_table;
use crate::data::model::Table;
use crate::data::params::{ParameterEntry, ParameterSet};
use crate::data::score::{ScoredTable, score_table};
use crate::error::{ProcessError, Stage};

// ---------------------------------------------------------------------------
// Session – threads the pipeline stages
// ---------------------------------------------------------------------------

/// A sheet together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub table: Table,
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// No destination was chosen; nothing was written.
    Cancelled,
}

/// One user session: uploaded sheets and everything derived from them.
///
/// Every stage runs a pure transform and stores its output. A failing stage
/// leaves the session untouched; loading a new sheet clears all derived
/// stages.
#[derive(Debug, Default)]
pub struct Session {
    marks: Option<LoadedTable>,
    exclusions: Option<LoadedTable>,
    filtered: Option<FilteredTable>,
    parameters: Option<ParameterSet>,
    scored: Option<ScoredTable>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the student marks sheet.
    pub fn load_marks(&mut self, path: Option<&Path>) -> Result<&Table, ProcessError> {
        let loaded = load(path, Stage::Marks)?;
        log::info!(
            "Loaded {} marks rows with columns {:?}",
            loaded.table.len(),
            loaded.table.headers
        );
        self.clear_derived();
        Ok(&self.marks.insert(loaded).table)
    }

    /// Load the exclusion sheet.
    pub fn load_exclusions(&mut self, path: Option<&Path>) -> Result<&Table, ProcessError> {
        let loaded = load(path, Stage::Exclusions)?;
        log::info!("Loaded {} exclusion rows", loaded.table.len());
        self.clear_derived();
        Ok(&self.exclusions.insert(loaded).table)
    }

    /// Both sheets are present, so processing can start.
    pub fn is_ready(&self) -> bool {
        self.marks.is_some() && self.exclusions.is_some()
    }

    /// Remove excluded candidates and discover the subject columns.
    pub fn filter(&mut self) -> Result<&FilteredTable, ProcessError> {
        let marks = self.marks.as_ref().ok_or(ProcessError::NotReady(Stage::Marks))?;
        let exclusions = self
            .exclusions
            .as_ref()
            .ok_or(ProcessError::NotReady(Stage::Exclusions))?;

        let excluded = exclusion_set(&exclusions.table)?;
        let filtered = filter_excluded(&marks.table, &excluded)?;
        log::info!(
            "Excluded {} of {} candidates; subjects: {:?}",
            filtered.excluded,
            marks.table.len(),
            filtered.subjects
        );

        self.parameters = None;
        self.scored = None;
        Ok(self.filtered.insert(filtered))
    }

    /// Subject columns of the filtered table, once filtering has run.
    pub fn subjects(&self) -> Option<&[String]> {
        self.filtered.as_ref().map(|f| f.subjects.as_slice())
    }

    /// Validate the parameter entries as a unit, then score and sort.
    pub fn score(&mut self, entries: &[ParameterEntry]) -> Result<&ScoredTable, ProcessError> {
        let filtered = self.filtered.as_ref().ok_or(ProcessError::NotReady(Stage::Filter))?;
        let params = ParameterSet::parse(&filtered.subjects, entries)?;

        let mut scored = score_table(filtered, &params)?;
        scored.sort_by_index();
        log::info!(
            "Scored {} candidates, {} eligible",
            scored.len(),
            scored.eligible_count()
        );

        self.parameters = Some(params);
        Ok(self.scored.insert(scored))
    }

    /// Save the scored table. `None` means the user cancelled the dialog.
    pub fn export(&self, destination: Option<&Path>) -> Result<ExportOutcome, ProcessError> {
        let scored = self.scored.as_ref().ok_or(ProcessError::NotReady(Stage::Score))?;
        let Some(destination) = destination else {
            log::warn!("No file was selected; the eligibility list was not saved");
            return Ok(ExportOutcome::Cancelled);
        };

        let path = resolve_destination(destination);
        write_table(&path, &scored.to_table()).map_err(|e| ProcessError::Export {
            path: path.clone(),
            message: format!("{e:#}"),
        })?;
        log::info!("Eligibility list saved as {}", path.display());
        Ok(ExportOutcome::Saved(path))
    }

    /// Discard everything and start over.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn marks(&self) -> Option<&LoadedTable> {
        self.marks.as_ref()
    }

    pub fn exclusions(&self) -> Option<&LoadedTable> {
        self.exclusions.as_ref()
    }

    pub fn filtered(&self) -> Option<&FilteredTable> {
        self.filtered.as_ref()
    }

    pub fn parameters(&self) -> Option<&ParameterSet> {
        self.parameters.as_ref()
    }

    pub fn scored(&self) -> Option<&ScoredTable> {
        self.scored.as_ref()
    }

    fn clear_derived(&mut self) {
        self.filtered = None;
        self.parameters = None;
        self.scored = None;
    }
}

fn load(path: Option<&Path>, stage: Stage) -> Result<LoadedTable, ProcessError> {
    let path = path.ok_or(ProcessError::NoFileSelected(stage))?;
    let table = load_table(path).map_err(|e| ProcessError::Format {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })?;
    Ok(LoadedTable {
        path: path.to_path_buf(),
        table,
    })
}
