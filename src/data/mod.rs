// Data layer: the seam the widgets and the dashboard consume, plus a
// small in-memory columnar table behind it. Heavy engines (GPU frames,
// lazy/distributed frames) would implement the same trait; nothing in
// the widget layer knows which one it is talking to.

pub mod filter;
pub mod table;

pub use filter::Filter;
pub use table::{Column, ColumnTable};

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{DType, Scalar};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' has no rows")]
    EmptyColumn(String),

    #[error("column '{column}' is {dtype}, expected a numeric or datetime column")]
    NotNumeric { column: String, dtype: DType },
}

/// Everything the widget layer reads from the dataset. Scans are
/// synchronous; callers treat them as cheap enough to run on the UI
/// thread, which holds for the in-memory table.
pub trait DataSource {
    fn row_count(&self) -> usize;

    fn dtype(&self, column: &str) -> Result<DType, DataError>;

    /// Column bounds, in the column's own scalar type.
    fn min_max(&self, column: &str) -> Result<(Scalar, Scalar), DataError>;

    /// Distinct values in first-occurrence order.
    fn unique(&self, column: &str) -> Result<Vec<Scalar>, DataError>;

    fn distinct_count(&self, column: &str) -> Result<usize, DataError>;

    /// Rows passing every filter.
    fn count_rows(&self, filters: &[Filter]) -> usize;

    /// Numeric projection of a column, restricted to rows passing `filters`.
    fn column_as_f64(&self, column: &str, filters: &[Filter]) -> Result<Vec<f64>, DataError>;

    /// Per-value row counts of a column, restricted to rows passing `filters`.
    fn value_counts(
        &self,
        column: &str,
        filters: &[Filter],
    ) -> Result<HashMap<String, usize>, DataError>;
}
