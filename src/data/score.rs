use std::fmt;

use super::filter::FilteredTable;
use super::model::{
    CellValue, ELIGIBILITY_COLUMN, ELIGIBILITY_THRESHOLD, FIRST_SUBJECT_COLUMN, GRADE_COLUMN,
    IndexKey, Table,
};
use super::params::ParameterSet;
use crate::error::{ParameterError, ParameterErrors};

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Eligibility {
    Eligible,
    NotEligible,
}

impl Eligibility {
    /// Classify a grade against the fixed threshold (inclusive).
    pub fn from_grade(grade: f64) -> Self {
        if grade >= ELIGIBILITY_THRESHOLD {
            Eligibility::Eligible
        } else {
            Eligibility::NotEligible
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "Eligible",
            Eligibility::NotEligible => "Not Eligible",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Eligible" => Some(Eligibility::Eligible),
            "Not Eligible" => Some(Eligibility::NotEligible),
            _ => None,
        }
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Scored records
// ---------------------------------------------------------------------------

/// One candidate after scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub key: IndexKey,
    /// Index Number and Name as loaded, followed by the coerced subject marks.
    pub cells: Vec<CellValue>,
    /// `(mark / max_mark) * weight` per subject, in parameter order.
    pub contributions: Vec<f64>,
    pub grade: f64,
    pub eligibility: Eligibility,
}

/// The filtered table with a grade and eligibility for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable {
    /// Headers of the filtered table (without Grade / Eligibility).
    pub headers: Vec<String>,
    pub subjects: Vec<String>,
    pub records: Vec<ScoredRecord>,
}

/// Grade of one row of coerced marks, plus each subject's contribution.
///
/// `marks` must be in the same order as the parameter set.
pub fn grade(marks: &[f64], params: &ParameterSet) -> (f64, Vec<f64>) {
    debug_assert_eq!(marks.len(), params.len(), "one mark per subject parameter");
    let contributions: Vec<f64> = marks
        .iter()
        .zip(params.iter())
        .map(|(mark, (_, p))| mark / p.max_mark * p.weight)
        .collect();
    let weighted_sum: f64 = contributions.iter().sum();
    (weighted_sum / params.total_weight() * 100.0, contributions)
}

/// Row position of each parameter's subject column, in parameter order.
///
/// The parameter set must name exactly the subjects of the table.
fn subject_columns(subjects: &[String], params: &ParameterSet) -> Result<Vec<usize>, ParameterErrors> {
    let mut errors = Vec::new();
    let mut columns = Vec::with_capacity(params.len());
    for (name, _) in params.iter() {
        match subjects.iter().position(|s| s == name) {
            Some(pos) => columns.push(FIRST_SUBJECT_COLUMN + pos),
            None => errors.push(ParameterError::UnknownSubject {
                subject: name.to_string(),
            }),
        }
    }
    for subject in subjects {
        if params.get(subject).is_none() {
            errors.push(ParameterError::MissingSubject {
                subject: subject.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(columns)
    } else {
        Err(ParameterErrors(errors))
    }
}

/// Score every row of the filtered table.
///
/// Subject cells that are empty or not numeric count as `0`; the coerced
/// marks replace the original subject cells in the result. Fails when the
/// parameter set does not cover exactly the table's subjects.
pub fn score_table(filtered: &FilteredTable, params: &ParameterSet) -> Result<ScoredTable, ParameterErrors> {
    let columns = subject_columns(&filtered.subjects, params)?;

    let records = filtered
        .table
        .rows
        .iter()
        .zip(&filtered.keys)
        .map(|(row, key)| {
            let marks: Vec<f64> = columns.iter().map(|&c| row[c].coerce_mark()).collect();
            let (grade, contributions) = grade(&marks, params);

            let mut cells = row[..FIRST_SUBJECT_COLUMN].to_vec();
            cells.extend(
                row[FIRST_SUBJECT_COLUMN..]
                    .iter()
                    .map(|cell| CellValue::Float(cell.coerce_mark())),
            );

            ScoredRecord {
                key: key.clone(),
                cells,
                contributions,
                grade,
                eligibility: Eligibility::from_grade(grade),
            }
        })
        .collect();

    Ok(ScoredTable {
        headers: filtered.table.headers.clone(),
        subjects: filtered.subjects.clone(),
        records,
    })
}

impl ScoredTable {
    /// Sort ascending by Index Number.
    ///
    /// Numeric when every key is a number, otherwise every key is compared as
    /// text. The sort is stable.
    pub fn sort_by_index(&mut self) {
        if self.records.iter().all(|r| r.key.is_numeric()) {
            self.records.sort_by(|a, b| a.key.cmp(&b.key));
        } else {
            self.records.sort_by_cached_key(|r| r.key.to_string());
        }
    }

    /// Output sheet: original columns followed by Grade and Eligibility.
    pub fn to_table(&self) -> Table {
        let mut headers = self.headers.clone();
        headers.push(GRADE_COLUMN.to_string());
        headers.push(ELIGIBILITY_COLUMN.to_string());

        let rows = self
            .records
            .iter()
            .map(|r| {
                let mut row = r.cells.clone();
                row.push(CellValue::Float(r.grade));
                row.push(CellValue::String(r.eligibility.label().to_string()));
                row
            })
            .collect();

        Table { headers, rows }
    }

    pub fn eligible_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.eligibility == Eligibility::Eligible)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
