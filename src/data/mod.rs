//! Data layer: core types, loading, filtering, scoring and export.
//!
//! Architecture:
//! ```text
//!  marks (.xlsx / .ods / .csv / ...)     exclusions (same formats)
//!        │                                   │
//!        ▼                                   ▼
//!   ┌──────────┐                       ┌──────────┐
//!   │  loader   │  parse file → Table   │  loader   │
//!   └──────────┘                       └──────────┘
//!        │                                   │ exclusion_set
//!        ▼                                   ▼
//!   ┌──────────────────────────────────────────────┐
//!   │  filter    drop excluded Index Numbers       │ → FilteredTable
//!   └──────────────────────────────────────────────┘
//!        │      ◄── params: weight / max mark per subject
//!        ▼
//!   ┌──────────┐
//!   │  score    │  grade + eligibility, sort by Index Number → ScoredTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  ScoredTable → .xlsx / .csv / .json
//!   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod params;
pub mod score;
