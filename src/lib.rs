//! Scoring engine behind the eligibility list processor.
//!
//! Loads a student marks sheet and an exclusion sheet, drops excluded
//! candidates, grades the rest with per-subject weights and maximum marks,
//! and writes the sorted eligibility list.

pub mod data;
pub mod error;
pub mod session;

pub use error::{ParameterError, ParameterErrors, ProcessError, SchemaError};
pub use session::{ExportOutcome, Session};
