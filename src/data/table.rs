// In-memory columnar table. Columns are typed vectors of equal length;
// rows are implicit indices.

use std::collections::{HashMap, HashSet};

use crate::data::{DataError, DataSource, Filter};
use crate::types::{DType, Scalar};

#[derive(Debug, Clone)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
    /// Milliseconds since the Unix epoch.
    DateTime(Vec<i64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
            Column::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            Column::Int(_) => DType::Int,
            Column::Float(_) => DType::Float,
            Column::Str(_) => DType::Str,
            Column::DateTime(_) => DType::DateTime,
        }
    }

    fn get(&self, row: usize) -> Scalar {
        match self {
            Column::Int(v) => Scalar::Int(v[row]),
            Column::Float(v) => Scalar::Float(v[row]),
            Column::Str(v) => Scalar::Str(v[row].clone()),
            Column::DateTime(v) => Scalar::DateTime(v[row]),
        }
    }

    fn get_f64(&self, row: usize) -> Option<f64> {
        match self {
            Column::Int(v) => Some(v[row] as f64),
            Column::Float(v) => Some(v[row]),
            Column::DateTime(v) => Some(v[row] as f64),
            Column::Str(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnTable {
    // Insertion order matters for display, so no map here.
    columns: Vec<(String, Column)>,
    rows: usize,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column. All columns must have the same length.
    pub fn with_column(mut self, name: &str, column: Column) -> Self {
        if self.columns.is_empty() {
            self.rows = column.len();
        } else {
            assert_eq!(
                self.rows,
                column.len(),
                "column '{name}' length does not match the table"
            );
        }
        self.columns.push((name.to_string(), column));
        self
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    fn col(&self, name: &str) -> Result<&Column, DataError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| DataError::UnknownColumn(name.to_string()))
    }

    fn row_matches(&self, row: usize, filters: &[Filter]) -> bool {
        filters.iter().all(|f| {
            let Ok(col) = self.col(f.column()) else {
                return false;
            };
            match f {
                Filter::Range { low, high, .. } => col
                    .get_f64(row)
                    .map(|v| *low <= v && v <= *high)
                    .unwrap_or(false),
                Filter::Eq { value, .. } => {
                    let cell = col.get(row);
                    match (cell.as_f64(), value.as_f64()) {
                        (Some(a), Some(b)) => a == b,
                        _ => cell.to_string() == value.to_string(),
                    }
                }
                Filter::In { values, .. } => {
                    let cell = col.get(row).to_string();
                    values.iter().any(|v| *v == cell)
                }
            }
        })
    }
}

impl DataSource for ColumnTable {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn dtype(&self, column: &str) -> Result<DType, DataError> {
        Ok(self.col(column)?.dtype())
    }

    fn min_max(&self, column: &str) -> Result<(Scalar, Scalar), DataError> {
        let col = self.col(column)?;
        if col.is_empty() {
            return Err(DataError::EmptyColumn(column.to_string()));
        }
        match col {
            Column::Int(v) => {
                let (lo, hi) = int_bounds(v);
                Ok((Scalar::Int(lo), Scalar::Int(hi)))
            }
            Column::DateTime(v) => {
                let (lo, hi) = int_bounds(v);
                Ok((Scalar::DateTime(lo), Scalar::DateTime(hi)))
            }
            Column::Float(v) => {
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                for &x in v {
                    lo = lo.min(x);
                    hi = hi.max(x);
                }
                Ok((Scalar::Float(lo), Scalar::Float(hi)))
            }
            Column::Str(_) => Err(DataError::NotNumeric {
                column: column.to_string(),
                dtype: DType::Str,
            }),
        }
    }

    fn unique(&self, column: &str) -> Result<Vec<Scalar>, DataError> {
        let col = self.col(column)?;
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for row in 0..col.len() {
            let cell = col.get(row);
            if seen.insert(cell.to_string()) {
                out.push(cell);
            }
        }
        Ok(out)
    }

    fn distinct_count(&self, column: &str) -> Result<usize, DataError> {
        Ok(self.unique(column)?.len())
    }

    fn count_rows(&self, filters: &[Filter]) -> usize {
        (0..self.rows).filter(|&r| self.row_matches(r, filters)).count()
    }

    fn column_as_f64(&self, column: &str, filters: &[Filter]) -> Result<Vec<f64>, DataError> {
        let col = self.col(column)?;
        if col.dtype() == DType::Str {
            return Err(DataError::NotNumeric {
                column: column.to_string(),
                dtype: DType::Str,
            });
        }
        Ok((0..self.rows)
            .filter(|&r| self.row_matches(r, filters))
            .filter_map(|r| col.get_f64(r))
            .collect())
    }

    fn value_counts(
        &self,
        column: &str,
        filters: &[Filter],
    ) -> Result<HashMap<String, usize>, DataError> {
        let col = self.col(column)?;
        let mut counts = HashMap::new();
        for row in 0..self.rows {
            if self.row_matches(row, filters) {
                *counts.entry(col.get(row).to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

fn int_bounds(v: &[i64]) -> (i64, i64) {
    let mut lo = i64::MAX;
    let mut hi = i64::MIN;
    for &x in v {
        lo = lo.min(x);
        hi = hi.max(x);
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ColumnTable {
        ColumnTable::new()
            .with_column("age", Column::Int(vec![10, 20, 30]))
            .with_column("rating", Column::Float(vec![1.5, 3.0, 4.5]))
            .with_column(
                "city",
                Column::Str(vec!["NY".into(), "LA".into(), "NY".into()]),
            )
    }

    #[test]
    fn min_max_keeps_column_type() {
        let t = table();
        assert_eq!(
            t.min_max("age").unwrap(),
            (Scalar::Int(10), Scalar::Int(30))
        );
        assert_eq!(
            t.min_max("rating").unwrap(),
            (Scalar::Float(1.5), Scalar::Float(4.5))
        );
    }

    #[test]
    fn min_max_rejects_string_columns() {
        assert!(matches!(
            table().min_max("city"),
            Err(DataError::NotNumeric { .. })
        ));
    }

    #[test]
    fn unique_preserves_first_occurrence_order() {
        let vals = table().unique("city").unwrap();
        assert_eq!(
            vals,
            vec![Scalar::Str("NY".into()), Scalar::Str("LA".into())]
        );
        assert_eq!(table().distinct_count("city").unwrap(), 2);
    }

    #[test]
    fn count_rows_applies_all_filters() {
        let t = table();
        assert_eq!(t.count_rows(&[]), 3);
        assert_eq!(
            t.count_rows(&[Filter::Range {
                column: "age".into(),
                low: 15.0,
                high: 25.0,
            }]),
            1
        );
        assert_eq!(
            t.count_rows(&[
                Filter::In {
                    column: "city".into(),
                    values: vec!["NY".into()],
                },
                Filter::Range {
                    column: "rating".into(),
                    low: 2.0,
                    high: 5.0,
                },
            ]),
            1
        );
        assert_eq!(
            t.count_rows(&[Filter::Eq {
                column: "age".into(),
                value: Scalar::Int(20),
            }]),
            1
        );
    }

    #[test]
    fn unknown_column_fails_closed() {
        let t = table();
        assert!(t.min_max("nope").is_err());
        assert_eq!(
            t.count_rows(&[Filter::Eq {
                column: "nope".into(),
                value: Scalar::Int(1),
            }]),
            0
        );
    }
}
