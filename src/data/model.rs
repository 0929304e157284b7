use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Header of the key column in both input tables.
pub const INDEX_COLUMN: &str = "Index Number";

/// Columns before this position are key and name; everything after is a subject.
pub const FIRST_SUBJECT_COLUMN: usize = 2;

pub const GRADE_COLUMN: &str = "Grade";
pub const ELIGIBILITY_COLUMN: &str = "Eligibility";

/// Minimum grade (inclusive) for a candidate to be eligible.
pub const ELIGIBILITY_THRESHOLD: f64 = 40.0;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, mirroring what spreadsheet readers produce.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Shortest representation that parses back to the same f64.
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Infer a typed value from raw text (CSV cells, text entries).
    ///
    /// Digit strings with a leading zero (`00123`) stay text: they are
    /// identifiers, and turning them into `123` would change the key.
    pub fn infer(s: &str) -> CellValue {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if has_leading_zero(s) {
            return CellValue::String(s.to_string());
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Interpret the value as a mark. Anything that is not a finite number
    /// (empty cells, booleans, free text like "absent") counts as `0`.
    pub fn coerce_mark(&self) -> f64 {
        let value = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            CellValue::Bool(_) | CellValue::Null => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Numeric view of the cell, without the zero fallback.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

fn has_leading_zero(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    digits.len() > 1 && digits.starts_with('0') && digits.chars().all(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// IndexKey – comparable form of an Index Number
// ---------------------------------------------------------------------------

/// Key used to match candidates between tables and to sort the result.
///
/// Integral values (`101`, `101.0`, `"101"`) collapse to the same `Number`
/// key so a CSV exclusion list matches a Parquet marks table. Other finite
/// numbers (`9.5`, `"9.5"`) become `Decimal` keys. Both numeric variants
/// order by value; `Text` keys order after every number.
#[derive(Debug, Clone)]
pub enum IndexKey {
    Number(i64),
    /// Finite and never representable as `Number`.
    Decimal(f64),
    Text(String),
}

impl IndexKey {
    /// Build a key from a cell. Empty cells have no key.
    pub fn from_cell(value: &CellValue) -> Option<IndexKey> {
        match value {
            CellValue::Null => None,
            CellValue::Integer(i) => Some(IndexKey::Number(*i)),
            CellValue::Float(v) => Some(IndexKey::from_f64(*v)),
            CellValue::Bool(b) => Some(IndexKey::Text(b.to_string())),
            CellValue::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                // Only canonical spellings are numeric: "0101" and "9.50" stay text.
                if let Ok(i) = s.parse::<i64>() {
                    if i.to_string() == s {
                        return Some(IndexKey::Number(i));
                    }
                }
                match s.parse::<f64>() {
                    Ok(v) if v.is_finite() && v.to_string() == s => Some(IndexKey::from_f64(v)),
                    _ => Some(IndexKey::Text(s.to_string())),
                }
            }
        }
    }

    fn from_f64(v: f64) -> IndexKey {
        if !v.is_finite() {
            IndexKey::Text(v.to_string())
        } else if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            IndexKey::Number(v as i64)
        } else {
            IndexKey::Decimal(v)
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, IndexKey::Number(_) | IndexKey::Decimal(_))
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use IndexKey::*;
        match (self, other) {
            (Number(a), Number(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
            // By value; `Number` first when the i64 rounds onto the same f64
            // so the two variants never compare equal.
            (Number(a), Decimal(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Decimal(a), Number(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
        }
    }
}

impl Hash for IndexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            IndexKey::Number(i) => i.hash(state),
            IndexKey::Decimal(v) => v.to_bits().hash(state),
            IndexKey::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Number(i) => write!(f, "{i}"),
            IndexKey::Decimal(v) => write!(f, "{v}"),
            IndexKey::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded sheet
// ---------------------------------------------------------------------------

/// A loaded sheet: ordered headers and rows with one cell per header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, padding short rows with `Null` so every row matches the
    /// header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Table { headers, rows }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
