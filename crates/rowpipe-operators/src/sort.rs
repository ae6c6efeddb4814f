//! Sort operator: stable ascending sort on one column's typed key.
//!
//! Keys are extracted once per row (decorate), sorted with a stable sort, and
//! the rows are rebuilt in key order. Ints and floats are both numeric and sort
//! together by value. Otherwise all keys must be of one kind; mixing, say,
//! numbers and text is a type error rather than a silent coercion.

use rowpipe_core::types::{RowSet, SortKey};
use rowpipe_core::Error;

use crate::traits::{OpError, UnaryOperator};

#[derive(Debug, Clone, Copy)]
pub struct Sort {
    pub column: usize,
}

impl Sort {
    pub fn new(column: usize) -> Self {
        Self { column }
    }
}

impl UnaryOperator for Sort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn describe(&self) -> String {
        format!("Sort(column={})", self.column)
    }

    fn transform(&self, input: RowSet) -> Result<RowSet, OpError> {
        let mut keyed = Vec::with_capacity(input.len());
        for row in input {
            let key = row.cell(self.column)?.sort_key()?;
            keyed.push((key, row));
        }

        if let Some((first, _)) = keyed.first() {
            if let Some((other, _)) = keyed.iter().find(|(k, _)| !k.same_kind(first)) {
                return Err(Error::TypeMismatch(format!(
                    "sort column {} mixes {} and {} values",
                    self.column,
                    first.class(),
                    other.class()
                ))
                .into());
            }
        }

        // `sort_by` is stable; ties keep their input order.
        keyed.sort_by(|(a, _), (b, _)| compare_same_kind(a, b));
        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }
}

fn compare_same_kind(a: &SortKey, b: &SortKey) -> std::cmp::Ordering {
    // Kinds were checked before sorting.
    a.try_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowpipe_core::types::{Cell, CellType, Row};

    fn vals(rs: &RowSet, col: usize) -> Vec<String> {
        rs.iter()
            .map(|r| r.cell(col).unwrap().val().to_string())
            .collect()
    }

    #[test]
    fn ints_sort_numerically() {
        let input: RowSet = [10, 2, 33, 1]
            .into_iter()
            .map(|v| Row::new(vec![Cell::int(v)]))
            .collect();
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["1", "2", "10", "33"]);
    }

    #[test]
    fn untyped_sorts_as_text() {
        let input: RowSet = ["10", "2", "1"]
            .into_iter()
            .map(|v| Row::new(vec![Cell::untyped(v)]))
            .collect();
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["1", "10", "2"]);
    }

    #[test]
    fn floats_and_bools() {
        let input: RowSet = [1.5, -0.25, 1.0]
            .into_iter()
            .map(|v| Row::new(vec![Cell::float(v)]))
            .collect();
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["-0.25", "1", "1.5"]);

        let input: RowSet = [true, false]
            .into_iter()
            .map(|v| Row::new(vec![Cell::bool(v)]))
            .collect();
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["false", "true"]);
    }

    #[test]
    fn ints_and_floats_sort_by_value() {
        let input = RowSet::new(vec![
            Row::new(vec![Cell::int(10)]),
            Row::new(vec![Cell::float(2.5)]),
            Row::new(vec![Cell::int(1)]),
            Row::new(vec![Cell::float(-3.0)]),
        ]);
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["-3", "1", "2.5", "10"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = RowSet::new(vec![
            Row::new(vec![Cell::int(2), Cell::string("first")]),
            Row::new(vec![Cell::int(1), Cell::string("x")]),
            Row::new(vec![Cell::int(2), Cell::string("second")]),
            Row::new(vec![Cell::int(2), Cell::string("third")]),
        ]);
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 1), vec!["x", "first", "second", "third"]);
    }

    #[test]
    fn compares_only_the_sort_column() {
        let input = RowSet::new(vec![
            Row::new(vec![Cell::string("a"), Cell::int(3)]),
            Row::new(vec![Cell::string("b"), Cell::int(1)]),
        ]);
        let out = Sort::new(1).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["b", "a"]);
    }

    #[test]
    fn mixed_kinds_are_rejected() {
        let input = RowSet::new(vec![
            Row::new(vec![Cell::int(1)]),
            Row::new(vec![Cell::string("one")]),
        ]);
        assert_eq!(
            Sort::new(0).transform(input).unwrap_err(),
            OpError::Core(Error::TypeMismatch(
                "sort column 0 mixes numeric and text values".into()
            ))
        );

        let input = RowSet::new(vec![
            Row::new(vec![Cell::float(0.5)]),
            Row::new(vec![Cell::bool(true)]),
        ]);
        assert!(matches!(
            Sort::new(0).transform(input),
            Err(OpError::Core(Error::TypeMismatch(_)))
        ));
    }

    #[test]
    fn text_and_untyped_share_a_kind() {
        let input = RowSet::new(vec![
            Row::new(vec![Cell::string("b")]),
            Row::new(vec![Cell::untyped("a")]),
        ]);
        let out = Sort::new(0).transform(input).unwrap();
        assert_eq!(vals(&out, 0), vec!["a", "b"]);
    }

    #[test]
    fn missing_column_fails_even_for_one_row() {
        let input = RowSet::new(vec![Row::new(vec![Cell::int(1)])]);
        assert_eq!(
            Sort::new(1).transform(input).unwrap_err(),
            OpError::Core(Error::ColumnOutOfRange { index: 1, width: 1 })
        );
    }

    #[test]
    fn bad_typed_text_fails() {
        let input = RowSet::new(vec![Row::new(vec![Cell::new(CellType::Float, 1, "?")])]);
        assert!(Sort::new(0).transform(input).is_err());
    }
}
