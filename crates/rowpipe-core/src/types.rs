//! Tabular value model: `Cell`, `Row`, `RowSet`.
//!
//! Cells keep their value as text and carry a type tag; typed behavior
//! (truthiness, ordering) is derived from the tag on demand. Every
//! transformation builds new rows/row sets; nothing here mutates in place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    /// Untyped text, as produced by the table loader.
    #[default]
    None,
    Int,
    Float,
    String,
    Bool,
}

impl CellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::None => "none",
            CellType::Int => "int",
            CellType::Float => "float",
            CellType::String => "string",
            CellType::Bool => "bool",
        }
    }

    /// Parse a type name as used in pipeline files.
    pub fn parse(s: &str) -> Option<CellType> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "untyped" => Some(CellType::None),
            "int" | "int64" | "i64" => Some(CellType::Int),
            "float" | "float64" | "f64" => Some(CellType::Float),
            "string" | "str" | "utf8" => Some(CellType::String),
            "bool" | "boolean" => Some(CellType::Bool),
            _ => None,
        }
    }
}

/// One scalar value. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    cell_type: CellType,
    size: usize,
    val: String,
}

impl Cell {
    pub fn new(cell_type: CellType, size: usize, val: impl Into<String>) -> Self {
        Self {
            cell_type,
            size,
            val: val.into(),
        }
    }

    /// Untyped cell with a zero size hint, the loader's default shape.
    pub fn untyped(val: impl Into<String>) -> Self {
        Self::new(CellType::None, 0, val)
    }

    pub fn int(v: i64) -> Self {
        Self::sized(CellType::Int, v.to_string())
    }

    pub fn float(v: f64) -> Self {
        Self::sized(CellType::Float, v.to_string())
    }

    pub fn string(v: impl Into<String>) -> Self {
        Self::sized(CellType::String, v.into())
    }

    pub fn bool(v: bool) -> Self {
        Self::sized(CellType::Bool, v.to_string())
    }

    fn sized(cell_type: CellType, val: String) -> Self {
        Self {
            cell_type,
            size: val.len(),
            val,
        }
    }

    /// Tag raw text with the narrowest type it parses as.
    ///
    /// Empty text stays untyped; anything that is not an integer, finite
    /// float or boolean literal becomes a string. `nan`/`inf` spellings are
    /// text, not floats.
    pub fn infer(text: &str) -> Self {
        if text.is_empty() {
            return Self::untyped(text);
        }
        let cell_type = if text.parse::<i64>().is_ok() {
            CellType::Int
        } else if text.parse::<f64>().is_ok_and(f64::is_finite) {
            CellType::Float
        } else if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false") {
            CellType::Bool
        } else {
            CellType::String
        };
        Self::sized(cell_type, text.to_string())
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Byte length hint. Informational only.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn val(&self) -> &str {
        &self.val
    }

    /// Truthiness according to the type tag.
    ///
    /// - `None`/`String`: non-empty text
    /// - `Int`/`Float`: non-zero (NaN counts as truthy)
    /// - `Bool`: `true`/`1`
    pub fn is_truthy(&self) -> Result<bool> {
        match self.cell_type {
            CellType::None | CellType::String => Ok(!self.val.is_empty()),
            CellType::Int => Ok(self.parse_int()? != 0),
            CellType::Float => Ok(self.parse_float()? != 0.0),
            CellType::Bool => self.parse_bool(),
        }
    }

    /// Ordering key derived from the type tag.
    pub fn sort_key(&self) -> Result<SortKey> {
        Ok(match self.cell_type {
            CellType::None | CellType::String => SortKey::Text(self.val.clone()),
            CellType::Int => SortKey::Int(self.parse_int()?),
            CellType::Float => SortKey::Float(self.parse_float()?),
            CellType::Bool => SortKey::Bool(self.parse_bool()?),
        })
    }

    fn parse_int(&self) -> Result<i64> {
        self.val.trim().parse::<i64>().map_err(|_| {
            Error::TypeMismatch(format!("cannot read '{}' as int", self.val))
        })
    }

    fn parse_float(&self) -> Result<f64> {
        self.val.trim().parse::<f64>().map_err(|_| {
            Error::TypeMismatch(format!("cannot read '{}' as float", self.val))
        })
    }

    fn parse_bool(&self) -> Result<bool> {
        let v = self.val.trim();
        if v.eq_ignore_ascii_case("true") || v == "1" {
            Ok(true)
        } else if v.eq_ignore_ascii_case("false") || v == "0" {
            Ok(false)
        } else {
            Err(Error::TypeMismatch(format!(
                "cannot read '{}' as bool",
                self.val
            )))
        }
    }
}

/// Typed ordering key for a single cell.
///
/// Int and Float keys are both numeric and compare with each other; any other
/// pairing of different kinds is not comparable: see [`SortKey::try_cmp`].
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl SortKey {
    pub fn kind(&self) -> &'static str {
        match self {
            SortKey::Int(_) => "int",
            SortKey::Float(_) => "float",
            SortKey::Bool(_) => "bool",
            SortKey::Text(_) => "text",
        }
    }

    /// Comparison class: `numeric` (int and float), `bool` or `text`.
    pub fn class(&self) -> &'static str {
        match self {
            SortKey::Int(_) | SortKey::Float(_) => "numeric",
            SortKey::Bool(_) => "bool",
            SortKey::Text(_) => "text",
        }
    }

    /// True when `try_cmp` accepts the pair.
    pub fn same_kind(&self, other: &SortKey) -> bool {
        self.class() == other.class()
    }

    /// Compare two keys of one class. Floats use the IEEE total order; an
    /// int against a float compares by exact numeric value.
    pub fn try_cmp(&self, other: &SortKey) -> Result<Ordering> {
        use SortKey::*;
        match (self, other) {
            (Int(a), Int(b)) => Ok(a.cmp(b)),
            (Float(a), Float(b)) => Ok(a.total_cmp(b)),
            (Int(a), Float(b)) => Ok(cmp_int_float(*a, *b)),
            (Float(a), Int(b)) => Ok(cmp_int_float(*b, *a).reverse()),
            (Bool(a), Bool(b)) => Ok(a.cmp(b)),
            (Text(a), Text(b)) => Ok(a.cmp(b)),
            _ => Err(Error::TypeMismatch(format!(
                "cannot order {} against {}",
                self.kind(),
                other.kind()
            ))),
        }
    }
}

fn cmp_int_float(a: i64, b: f64) -> Ordering {
    match (a as f64).total_cmp(&b) {
        // `a as f64` may have rounded onto `b`; `b` is integral here and
        // within i128 range, so settle it exactly.
        Ordering::Equal => (a as i128).cmp(&(b as i128)),
        ord => ord,
    }
}

/// An ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Positional access; out-of-range is an input shape error.
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells.get(index).ok_or(Error::ColumnOutOfRange {
            index,
            width: self.cells.len(),
        })
    }

    /// Consume the row and return it with `cell` appended.
    pub fn with_cell(mut self, cell: Cell) -> Row {
        self.cells.push(cell);
        self
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row::new(cells)
    }
}

/// An ordered sequence of rows; the unit every operator consumes and produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the set (0 when empty). Ragged sets are allowed.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        RowSet::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_shaped_cell_is_untyped_and_unsized() {
        let c = Cell::untyped("hello");
        assert_eq!(c.cell_type(), CellType::None);
        assert_eq!(c.size(), 0);
        assert_eq!(c.val(), "hello");
    }

    #[test]
    fn truthiness_per_tag() {
        assert!(Cell::untyped("x").is_truthy().unwrap());
        assert!(!Cell::untyped("").is_truthy().unwrap());
        assert!(!Cell::string("").is_truthy().unwrap());
        assert!(Cell::int(-3).is_truthy().unwrap());
        assert!(!Cell::int(0).is_truthy().unwrap());
        assert!(!Cell::float(0.0).is_truthy().unwrap());
        assert!(Cell::float(0.5).is_truthy().unwrap());
        assert!(Cell::bool(true).is_truthy().unwrap());
        assert!(!Cell::bool(false).is_truthy().unwrap());
        assert!(!Cell::new(CellType::Bool, 1, "0").is_truthy().unwrap());
        // "0" as plain text is non-empty, so it is truthy
        assert!(Cell::untyped("0").is_truthy().unwrap());
    }

    #[test]
    fn malformed_typed_cell_is_type_mismatch() {
        let bad = Cell::new(CellType::Int, 3, "abc");
        assert!(matches!(bad.is_truthy(), Err(Error::TypeMismatch(_))));
        assert!(matches!(bad.sort_key(), Err(Error::TypeMismatch(_))));

        let bad_bool = Cell::new(CellType::Bool, 3, "yes");
        assert!(matches!(bad_bool.is_truthy(), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn int_keys_compare_numerically() {
        let a = Cell::int(10).sort_key().unwrap();
        let b = Cell::int(2).sort_key().unwrap();
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Greater);

        // The same values as text compare lexicographically.
        let a = Cell::untyped("10").sort_key().unwrap();
        let b = Cell::untyped("2").sort_key().unwrap();
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
    }

    #[test]
    fn int_and_float_keys_compare_numerically() {
        let ten = Cell::int(10).sort_key().unwrap();
        let two_half = Cell::float(2.5).sort_key().unwrap();
        assert!(ten.same_kind(&two_half));
        assert_eq!(ten.try_cmp(&two_half).unwrap(), Ordering::Greater);
        assert_eq!(two_half.try_cmp(&ten).unwrap(), Ordering::Less);

        let two = Cell::int(2).sort_key().unwrap();
        let two_f = Cell::float(2.0).sort_key().unwrap();
        assert_eq!(two.try_cmp(&two_f).unwrap(), Ordering::Equal);

        // 2^53 + 1 is not representable as f64 but must still sort above 2^53.
        let big = SortKey::Int((1i64 << 53) + 1);
        let big_f = SortKey::Float((1i64 << 53) as f64);
        assert_eq!(big.try_cmp(&big_f).unwrap(), Ordering::Greater);
        assert_eq!(
            SortKey::Int(i64::MAX).try_cmp(&SortKey::Float(9.223372036854775807e18)).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_key_kinds_do_not_compare() {
        let a = Cell::int(1).sort_key().unwrap();
        let b = Cell::string("1").sort_key().unwrap();
        assert!(!a.same_kind(&b));
        assert!(matches!(a.try_cmp(&b), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn infer_picks_narrowest_type() {
        assert_eq!(Cell::infer("42").cell_type(), CellType::Int);
        assert_eq!(Cell::infer("4.2").cell_type(), CellType::Float);
        assert_eq!(Cell::infer("TRUE").cell_type(), CellType::Bool);
        assert_eq!(Cell::infer("forty").cell_type(), CellType::String);
        assert_eq!(Cell::infer("").cell_type(), CellType::None);
        assert_eq!(Cell::infer("42").size(), 2);
    }

    #[test]
    fn infer_keeps_nan_and_inf_spellings_as_text() {
        for text in ["Nan", "NaN", "nan", "Inf", "inf", "-Infinity", "1e400"] {
            assert_eq!(Cell::infer(text).cell_type(), CellType::String, "{}", text);
        }
        assert_eq!(Cell::infer("1e3").cell_type(), CellType::Float);
        assert_eq!(Cell::infer("-0.5").cell_type(), CellType::Float);
    }

    #[test]
    fn row_cell_out_of_range() {
        let row = Row::new(vec![Cell::int(1)]);
        assert_eq!(
            row.cell(3).unwrap_err(),
            Error::ColumnOutOfRange { index: 3, width: 1 }
        );
    }

    #[test]
    fn with_cell_appends_trailing() {
        let row = Row::new(vec![Cell::int(1)]).with_cell(Cell::string("x"));
        assert_eq!(row.len(), 2);
        assert_eq!(row.cell(1).unwrap().val(), "x");
    }

    #[test]
    fn ragged_row_set_is_accepted() {
        let rs: RowSet = vec![
            Row::new(vec![Cell::int(1)]),
            Row::new(vec![Cell::int(1), Cell::int(2), Cell::int(3)]),
            Row::default(),
        ]
        .into_iter()
        .collect();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs.max_width(), 3);
    }

    #[test]
    fn type_names_parse() {
        assert_eq!(CellType::parse("Int64"), Some(CellType::Int));
        assert_eq!(CellType::parse("utf8"), Some(CellType::String));
        assert_eq!(CellType::parse("decimal"), None);
        assert_eq!(CellType::parse(CellType::Bool.as_str()), Some(CellType::Bool));
    }
}
