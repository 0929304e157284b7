use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Violations of the input sheet layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("marks table needs at least 2 columns (Index Number, Name), found {found}")]
    TooFewColumns { found: usize },

    #[error("{table} table has no 'Index Number' column")]
    MissingKeyColumn { table: &'static str },

    #[error("'Index Number' must be the first column of the marks table, found '{found}'")]
    KeyColumnNotFirst { found: String },

    #[error("column '{name}' appears more than once in the marks table")]
    DuplicateColumn { name: String },

    #[error("marks row {row} has an empty Index Number")]
    MissingIndex { row: usize },

    #[error("Index Number {key} appears more than once in the marks table")]
    DuplicateIndex { key: String },
}

/// Which half of a subject parameter an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Weight,
    MaxMark,
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamField::Weight => write!(f, "weight"),
            ParamField::MaxMark => write!(f, "max marks"),
        }
    }
}

/// A single problem found while validating subject parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{subject}: {field} '{input}' is not a number")]
    InvalidNumber {
        subject: String,
        field: ParamField,
        input: String,
    },

    #[error("{subject}: {field} must be greater than zero, got {value}")]
    NotPositive {
        subject: String,
        field: ParamField,
        value: f64,
    },

    #[error("{subject}: no weight and max marks entered")]
    MissingSubject { subject: String },

    #[error("{subject}: not a subject column of the marks table")]
    UnknownSubject { subject: String },

    #[error("{subject}: entered more than once")]
    DuplicateSubject { subject: String },

    #[error("the marks table has no subject columns to weight")]
    NoSubjects,
}

/// Every problem of a rejected parameter submission, in entry order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterErrors(pub Vec<ParameterError>);

impl fmt::Display for ParameterErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid subject parameters: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParameterErrors {}

/// Pipeline stages, used to report steps run out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Marks,
    Exclusions,
    Filter,
    Score,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Marks => write!(f, "the student marks file"),
            Stage::Exclusions => write!(f, "the exclusion file"),
            Stage::Filter => write!(f, "processing"),
            Stage::Score => write!(f, "scoring"),
        }
    }
}

/// Errors surfaced to the user by the session.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no file selected for {0}")]
    NoFileSelected(Stage),

    #[error("failed to read {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parameters(#[from] ParameterErrors),

    #[error("{0} is required first")]
    NotReady(Stage),

    #[error("failed to save {}: {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_errors_lists_every_problem() {
        let errors = ParameterErrors(vec![
            ParameterError::InvalidNumber {
                subject: "Math".into(),
                field: ParamField::Weight,
                input: "two".into(),
            },
            ParameterError::NotPositive {
                subject: "English".into(),
                field: ParamField::MaxMark,
                value: 0.0,
            },
        ]);
        let text = errors.to_string();
        assert!(text.contains("Math: weight 'two' is not a number"));
        assert!(text.contains("English: max marks must be greater than zero"));
    }

    #[test]
    fn test_not_ready_message() {
        let err = ProcessError::NotReady(Stage::Exclusions);
        assert_eq!(err.to_string(), "the exclusion file is required first");
    }
}
