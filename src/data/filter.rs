use std::collections::BTreeSet;

use super::model::{FIRST_SUBJECT_COLUMN, INDEX_COLUMN, IndexKey, Table};
use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Exclusion set
// ---------------------------------------------------------------------------

/// Index Numbers removed from consideration before scoring.
pub type ExclusionSet = BTreeSet<IndexKey>;

/// Collect the exclusion set from the `Index Number` column of an exclusion
/// sheet. The column may sit anywhere; other columns are ignored, as are rows
/// with an empty key.
pub fn exclusion_set(exclusions: &Table) -> Result<ExclusionSet, SchemaError> {
    let key_idx = exclusions
        .column_index(INDEX_COLUMN)
        .ok_or(SchemaError::MissingKeyColumn { table: "exclusion" })?;

    Ok(exclusions
        .rows
        .iter()
        .filter_map(|row| IndexKey::from_cell(&row[key_idx]))
        .collect())
}

// ---------------------------------------------------------------------------
// Filtered table
// ---------------------------------------------------------------------------

/// Marks table with excluded candidates removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    /// Remaining rows, original column and row order.
    pub table: Table,
    /// Key of each remaining row, parallel to `table.rows`.
    pub keys: Vec<IndexKey>,
    /// Subject column names (every column after Index Number and Name).
    pub subjects: Vec<String>,
    /// How many marks rows matched the exclusion set.
    pub excluded: usize,
}

/// Check the positional layout of a marks sheet and return its row keys.
///
/// The marks sheet must start with `Index Number`, then the name column, with
/// no header repeated. Every Index Number must be present and unique.
pub fn validate_marks(marks: &Table) -> Result<Vec<IndexKey>, SchemaError> {
    if marks.headers.len() < FIRST_SUBJECT_COLUMN {
        return Err(SchemaError::TooFewColumns {
            found: marks.headers.len(),
        });
    }
    match marks.column_index(INDEX_COLUMN) {
        None => return Err(SchemaError::MissingKeyColumn { table: "marks" }),
        Some(0) => {}
        Some(_) => {
            return Err(SchemaError::KeyColumnNotFirst {
                found: marks.headers[0].clone(),
            })
        }
    }

    let mut names = BTreeSet::new();
    if let Some(name) = marks.headers.iter().find(|h| !names.insert(h.as_str())) {
        return Err(SchemaError::DuplicateColumn { name: name.clone() });
    }

    let mut seen = BTreeSet::new();
    marks
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            // Row numbers as the user sees them: header is row 1.
            let key = IndexKey::from_cell(&row[0]).ok_or(SchemaError::MissingIndex { row: i + 2 })?;
            if !seen.insert(key.clone()) {
                return Err(SchemaError::DuplicateIndex {
                    key: key.to_string(),
                });
            }
            Ok(key)
        })
        .collect()
}

/// Remove every candidate whose Index Number is in `excluded`.
///
/// Kept rows are copied unchanged and in their original order.
pub fn filter_excluded(marks: &Table, excluded: &ExclusionSet) -> Result<FilteredTable, SchemaError> {
    let all_keys = validate_marks(marks)?;

    let (rows, keys): (Vec<_>, Vec<_>) = marks
        .rows
        .iter()
        .zip(all_keys)
        .filter(|(_, key)| !excluded.contains(key))
        .map(|(row, key)| (row.clone(), key))
        .unzip();

    let excluded_count = marks.len() - rows.len();

    Ok(FilteredTable {
        table: Table {
            headers: marks.headers.clone(),
            rows,
        },
        keys,
        subjects: marks.headers[FIRST_SUBJECT_COLUMN..].to_vec(),
        excluded: excluded_count,
    })
}
