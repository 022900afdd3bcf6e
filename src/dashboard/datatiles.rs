// Datatile cache: a precomputed aggregation of the active widget's
// column over the rows passing every *other* widget's filter. Range
// mode keeps a sorted projection so range counts are two binary
// searches; discrete mode keeps per-value counts. A cold cache simply
// makes the controller fall back to a direct scan.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DataTiles {
    sorted: Vec<f64>,
    counts: HashMap<String, usize>,
    total: usize,
    cumulative: bool,
    loaded: bool,
}

impl DataTiles {
    pub fn clear(&mut self) {
        self.sorted.clear();
        self.counts.clear();
        self.total = 0;
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Warm the cache in range (cumulative) mode.
    pub fn load_range(&mut self, mut values: Vec<f64>) {
        values.sort_by(|a, b| a.total_cmp(b));
        self.total = values.len();
        self.sorted = values;
        self.counts.clear();
        self.cumulative = true;
        self.loaded = true;
    }

    /// Warm the cache in discrete (value-count) mode.
    pub fn load_counts(&mut self, counts: HashMap<String, usize>) {
        self.total = counts.values().sum();
        self.counts = counts;
        self.sorted.clear();
        self.cumulative = false;
        self.loaded = true;
    }

    /// Rows with `low <= value <= high`; `None` when the cache cannot answer.
    pub fn count_in_range(&self, low: f64, high: f64) -> Option<usize> {
        if !self.loaded || !self.cumulative {
            return None;
        }
        let from = self.sorted.partition_point(|&v| v < low);
        let to = self.sorted.partition_point(|&v| v <= high);
        Some(to.saturating_sub(from))
    }

    /// Rows whose value is one of `values`; an empty selection means no
    /// filter and yields the cache total. `None` when the cache cannot
    /// answer.
    pub fn count_selected(&self, values: &[String]) -> Option<usize> {
        if !self.loaded || self.cumulative {
            return None;
        }
        if values.is_empty() {
            return Some(self.total);
        }
        Some(
            values
                .iter()
                .map(|v| self.counts.get(v).copied().unwrap_or(0))
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_counts_are_inclusive() {
        let mut tiles = DataTiles::default();
        tiles.load_range(vec![10.0, 20.0, 30.0]);
        assert_eq!(tiles.count_in_range(10.0, 30.0), Some(3));
        assert_eq!(tiles.count_in_range(15.0, 25.0), Some(1));
        assert_eq!(tiles.count_in_range(31.0, 40.0), Some(0));
    }

    #[test]
    fn equal_bounds_count_exact_matches() {
        let mut tiles = DataTiles::default();
        tiles.load_range(vec![1.0, 2.0, 2.0, 3.0]);
        assert_eq!(tiles.count_in_range(2.0, 2.0), Some(2));
        assert_eq!(tiles.count_in_range(4.0, 4.0), Some(0));
    }

    #[test]
    fn discrete_counts_sum_selection() {
        let mut tiles = DataTiles::default();
        let mut counts = HashMap::new();
        counts.insert("NY".to_string(), 2);
        counts.insert("LA".to_string(), 1);
        tiles.load_counts(counts);
        assert_eq!(tiles.count_selected(&["NY".into(), "LA".into()]), Some(3));
        assert_eq!(tiles.count_selected(&["SF".into()]), Some(0));
        assert_eq!(tiles.count_selected(&[]), Some(3));
    }

    #[test]
    fn cold_or_wrong_mode_cache_answers_nothing() {
        let mut tiles = DataTiles::default();
        assert_eq!(tiles.count_in_range(0.0, 1.0), None);
        tiles.load_range(vec![1.0]);
        assert_eq!(tiles.count_selected(&[]), None);
        tiles.clear();
        assert!(!tiles.is_loaded());
    }
}
