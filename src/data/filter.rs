use chrono::NaiveDate;

use super::error::{DataError, DataResult};
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// Date range: inclusive on both ends, compared on the calendar date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DataResult<Self> {
        if start > end {
            return Err(DataError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Earliest and latest sale date over the dataset.
pub fn bounds(dataset: &SalesDataset) -> DataResult<(NaiveDate, NaiveDate)> {
    let mut dates = dataset.records().iter().map(|r| r.sale_date.date());
    let first = dates.next().ok_or(DataError::EmptyDataset)?;
    Ok(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// Initialise a [`DateRange`] spanning the whole dataset (i.e., show everything).
pub fn init_date_range(dataset: &SalesDataset) -> DataResult<DateRange> {
    let (min, max) = bounds(dataset)?;
    Ok(DateRange { start: min, end: max })
}

/// Clamp a user-chosen pair into `bounds`, swapping it if reversed.
///
/// Used by the interaction surface before calling [`filter_by_date`],
/// which itself never clamps.
pub fn clamp_range(start: NaiveDate, end: NaiveDate, bounds: (NaiveDate, NaiveDate)) -> DateRange {
    let (lo, hi) = bounds;
    let (a, b) = if start <= end { (start, end) } else { (end, start) };
    DateRange {
        start: a.clamp(lo, hi),
        end: b.clamp(lo, hi),
    }
}

/// Return indices of records whose sale date falls inside `range`.
pub fn filtered_indices(dataset: &SalesDataset, range: &DateRange) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.sale_date.date()))
        .map(|(i, _)| i)
        .collect()
}

/// Records with `start <= sale_date <= end`, unchanged and in source order.
///
/// An empty result is valid.
pub fn filter_by_date(
    dataset: &SalesDataset,
    start: NaiveDate,
    end: NaiveDate,
) -> DataResult<SalesDataset> {
    let range = DateRange::new(start, end)?;
    Ok(dataset.select(&filtered_indices(dataset, &range)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawSalesRow;
    use crate::data::prepare::prepare;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn scenario() -> SalesDataset {
        prepare(&[
            RawSalesRow::new("2023-01-01", 10.0, 0.0, 0.0),
            RawSalesRow::new("2023-01-02", 20.0, 2.0, 50.0),
            RawSalesRow::new("2023-01-03", 5.0, 5.0, 20.0),
        ])
        .unwrap()
    }

    fn month() -> SalesDataset {
        let rows: Vec<RawSalesRow> = (1..=28)
            .map(|d| {
                let units = (d % 6) as f64;
                RawSalesRow::new(
                    format!("2023-01-{d:02} {:02}:30:00", d % 24),
                    d as f64,
                    units,
                    units * d as f64 * 0.9,
                )
            })
            .collect();
        prepare(&rows).unwrap()
    }

    #[test]
    fn scenario_bounds_and_single_day_filter() {
        let ds = scenario();
        assert_eq!(bounds(&ds).unwrap(), (day(2), day(3)));

        let only = filter_by_date(&ds, day(3), day(3)).unwrap();
        assert_eq!(only.records(), &ds.records()[1..]);
    }

    #[test]
    fn bounds_of_empty_dataset_fails() {
        assert_eq!(bounds(&SalesDataset::default()), Err(DataError::EmptyDataset));
        assert!(init_date_range(&SalesDataset::default()).is_err());
    }

    #[test]
    fn reversed_range_fails() {
        let err = filter_by_date(&scenario(), day(3), day(2)).unwrap_err();
        assert_eq!(err, DataError::InvalidRange { start: day(3), end: day(2) });
    }

    #[test]
    fn full_bounds_is_identity() {
        let ds = month();
        let (lo, hi) = bounds(&ds).unwrap();
        assert_eq!(filter_by_date(&ds, lo, hi).unwrap(), ds);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = month();
        let once = filter_by_date(&ds, day(5), day(17)).unwrap();
        let twice = filter_by_date(&once, day(5), day(17)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn narrower_range_is_subset() {
        let ds = month();
        let wide = filter_by_date(&ds, day(3), day(25)).unwrap();
        let narrow = filter_by_date(&ds, day(10), day(12)).unwrap();
        assert!(!narrow.is_empty());
        assert!(narrow.records().iter().all(|r| wide.records().contains(r)));
    }

    #[test]
    fn bounds_are_inclusive_despite_time_of_day() {
        let ds = month();
        let hits = filter_by_date(&ds, day(13), day(13)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.records()[0].sale_date.date(), day(13));
    }

    #[test]
    fn out_of_data_range_is_empty_not_error() {
        let ds = scenario();
        let none = filter_by_date(
            &ds,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn clamp_orders_and_limits() {
        let b = (day(5), day(20));
        assert_eq!(clamp_range(day(1), day(30), b), DateRange { start: day(5), end: day(20) });
        assert_eq!(clamp_range(day(12), day(8), b), DateRange { start: day(8), end: day(12) });
        assert_eq!(clamp_range(day(25), day(28), b), DateRange { start: day(20), end: day(20) });
    }

    #[test]
    fn range_days_counts_both_ends() {
        assert_eq!(DateRange::new(day(2), day(2)).unwrap().days(), 1);
        assert_eq!(DateRange::new(day(1), day(31)).unwrap().days(), 31);
    }
}
