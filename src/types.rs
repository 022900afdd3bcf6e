// Shared value types used across the data layer, the widgets and the views.

use chrono::{DateTime, Utc};

/// Column data types supported by the in-memory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DType {
    Int,
    Float,
    Str,
    /// Milliseconds since the Unix epoch, UTC.
    DateTime,
}

/// A single cell value, also used as a literal binding in the query context.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
    /// Milliseconds since the Unix epoch, UTC.
    DateTime(i64),
}

impl Scalar {
    /// Numeric view of the value; strings have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::DateTime(ms) => Some(*ms as f64),
            Scalar::Str(_) => None,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(s) => f.write_str(s),
            Scalar::DateTime(ms) => f.write_str(&format_datetime(*ms)),
        }
    }
}

/// Render an epoch-milliseconds timestamp for labels and query literals.
pub fn format_datetime(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => format!("{ms}ms"),
    }
}

/// A value change surfaced by a control, carrying both the previous and
/// the new value. The hosting loop forwards these to the dashboard
/// synchronously; there is no other dispatch mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<T> {
    pub old: T,
    pub new: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display_matches_query_literal_forms() {
        assert_eq!(Scalar::Int(15).to_string(), "15");
        assert_eq!(Scalar::Float(15.0).to_string(), "15");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Str("NY".into()).to_string(), "NY");
    }

    #[test]
    fn datetime_formats_as_date() {
        // 2020-01-01T00:00:00Z
        assert_eq!(format_datetime(1_577_836_800_000), "2020-01-01");
    }
}
