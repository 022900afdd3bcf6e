// Deterministic synthetic dataset so the dashboard has something to
// filter out of the box.

use chrono::NaiveDate;

use crate::data::{Column, ColumnTable};

const ROWS: usize = 500;
const DAY_MS: i64 = 86_400_000;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

pub fn demo_table() -> ColumnTable {
    let mut rng = Lcg(0x5eed);
    let base_ms = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(1_672_531_200_000);

    let cities = ["NY", "LA", "SF", "Chicago", "Austin"];
    let segments = ["free", "trial", "paid"];

    let mut age = Vec::with_capacity(ROWS);
    let mut rating = Vec::with_capacity(ROWS);
    let mut visits = Vec::with_capacity(ROWS);
    let mut city = Vec::with_capacity(ROWS);
    let mut segment = Vec::with_capacity(ROWS);
    let mut signup = Vec::with_capacity(ROWS);

    for _ in 0..ROWS {
        age.push(18 + (rng.next() % 48) as i64);
        rating.push((rng.next() % 51) as f64 / 10.0);
        visits.push((rng.next() % 41) as i64);
        city.push(cities[rng.pick(cities.len())].to_string());
        segment.push(segments[rng.pick(segments.len())].to_string());
        signup.push(base_ms + (rng.next() % 365) as i64 * DAY_MS);
    }

    ColumnTable::new()
        .with_column("age", Column::Int(age))
        .with_column("rating", Column::Float(rating))
        .with_column("visits", Column::Int(visits))
        .with_column("city", Column::Str(city))
        .with_column("segment", Column::Str(segment))
        .with_column("signup", Column::DateTime(signup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;

    #[test]
    fn table_is_deterministic_and_well_formed() {
        let a = demo_table();
        let b = demo_table();
        assert_eq!(a.row_count(), ROWS);
        assert_eq!(
            a.column_as_f64("age", &[]).unwrap(),
            b.column_as_f64("age", &[]).unwrap()
        );
        assert!(a.unique("city").unwrap().len() <= 5);
        let (lo, hi) = a.min_max("age").unwrap();
        assert!(lo.as_f64().unwrap() >= 18.0);
        assert!(hi.as_f64().unwrap() < 66.0);
    }
}
