// probity-core/src/domain/report.rs

use serde::{Serialize, Serializer};

/// Null count per column, in the table's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullCounts {
    entries: Vec<(String, u64)>,
}

impl NullCounts {
    pub fn insert(&mut self, column: impl Into<String>, count: u64) {
        let column = column.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((column, count)),
        }
    }

    /// Exact-name lookup; quoted identifiers may differ only by case.
    pub fn get(&self, column: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns holding at least one null.
    pub fn offenders(&self) -> impl Iterator<Item = (&str, u64)> {
        self.iter().filter(|(_, n)| *n > 0)
    }
}

// Serialized as a `{column: count}` map.
impl Serialize for NullCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Cardinalities of two tables, in argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCountComparison {
    pub left: u64,
    pub right: u64,
}

impl RowCountComparison {
    pub fn is_balanced(&self) -> bool {
        self.left == self.right
    }

    pub fn difference(&self) -> i128 {
        i128::from(self.left) - i128::from(self.right)
    }
}

impl From<RowCountComparison> for (u64, u64) {
    fn from(c: RowCountComparison) -> Self {
        (c.left, c.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_counts_keep_insertion_order() {
        let mut counts = NullCounts::default();
        counts.insert("ORDER_ID", 0);
        counts.insert("AMOUNT", 3);
        counts.insert("CUSTOMER_ID", 1);
        counts.insert("AMOUNT", 2);

        let cols: Vec<&str> = counts.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, ["ORDER_ID", "AMOUNT", "CUSTOMER_ID"]);
        assert_eq!(counts.get("AMOUNT"), Some(2));
        assert_eq!(counts.offenders().count(), 2);
    }

    #[test]
    fn test_null_counts_keep_case_distinct_columns_apart() {
        let mut counts = NullCounts::default();
        counts.insert("amount", 1);
        counts.insert("AMOUNT", 5);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("amount"), Some(1));
        assert_eq!(counts.get("AMOUNT"), Some(5));
        assert_eq!(counts.get("Amount"), None);
    }

    #[test]
    fn test_null_counts_serialize_as_map() {
        let mut counts = NullCounts::default();
        counts.insert("B", 1);
        counts.insert("A", 0);
        assert_eq!(
            serde_json::to_string(&counts).ok().as_deref(),
            Some(r#"{"B":1,"A":0}"#)
        );
    }

    #[test]
    fn test_row_count_parity() {
        let even = RowCountComparison { left: 10, right: 10 };
        assert!(even.is_balanced());
        assert_eq!(<(u64, u64)>::from(even), (10, 10));

        let drift = RowCountComparison { left: 3, right: 7 };
        assert!(!drift.is_balanced());
        assert_eq!(drift.difference(), -4);
    }
}
