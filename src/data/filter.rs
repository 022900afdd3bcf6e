// Structured filters: the executable counterpart of the predicate
// strings the widgets publish into the query context. The table applies
// these; the strings exist for display and for external query engines.

use crate::types::Scalar;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `low <= column <= high`, numeric or datetime (epoch ms).
    Range {
        column: String,
        low: f64,
        high: f64,
    },
    /// `column == value`.
    Eq { column: String, value: Scalar },
    /// `column in (values...)`, compared by display form.
    In {
        column: String,
        values: Vec<String>,
    },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Range { column, .. } | Filter::Eq { column, .. } | Filter::In { column, .. } => {
                column
            }
        }
    }
}
