//! Limit operator: keep the first `limit` rows.

use rowpipe_core::types::RowSet;

use crate::traits::{OpError, UnaryOperator};

#[derive(Debug, Clone, Copy)]
pub struct Limit {
    pub limit: usize,
}

impl Limit {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl UnaryOperator for Limit {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn describe(&self) -> String {
        format!("Limit(limit={})", self.limit)
    }

    fn transform(&self, input: RowSet) -> Result<RowSet, OpError> {
        // A limit past the end returns the input unchanged.
        let mut rows = input.into_rows();
        rows.truncate(self.limit);
        Ok(RowSet::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowpipe_core::types::{Cell, Row};

    fn numbered(n: i64) -> RowSet {
        (0..n).map(|i| Row::new(vec![Cell::int(i)])).collect()
    }

    #[test]
    fn test_limit_prefix() {
        let out = Limit::new(3).transform(numbered(10)).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.rows()[0].cell(0).unwrap().val(), "0");
        assert_eq!(out.rows()[2].cell(0).unwrap().val(), "2");
    }

    #[test]
    fn test_limit_zero_is_empty() {
        let out = Limit::new(0).transform(numbered(4)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_limit_exceeds_size() {
        let input = numbered(2);
        let out = Limit::new(100).transform(input.clone()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_limit_on_empty_input() {
        let out = Limit::new(5).transform(RowSet::empty()).unwrap();
        assert!(out.is_empty());
    }
}
