use crate::models::{OverlapBand, ValuationRecord};

/// Compute the band every record's `[low, high]` range accepts.
///
/// `lo` is the highest `low`, `hi` the lowest `high`. A band exists only when
/// `lo < hi`; a zero-width or inverted intersection yields `None`, as does an
/// empty slice. The result does not depend on record order.
pub fn compute_overlap(records: &[ValuationRecord]) -> Option<OverlapBand> {
    let (first, rest) = records.split_first()?;

    let (lo, hi) = rest
        .iter()
        .fold((first.low, first.high), |(lo, hi), record| {
            (lo.max(record.low), hi.min(record.high))
        });

    if lo < hi {
        Some(OverlapBand { lo, hi })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(investor: &str, low: f64, high: f64) -> ValuationRecord {
        ValuationRecord::new(investor, low, low, high)
    }

    #[test]
    fn test_single_record_band_is_its_own_range() {
        let records = vec![ValuationRecord::new("A", 10.0, 12.0, 15.0)];
        assert_eq!(compute_overlap(&records), Some(OverlapBand { lo: 10.0, hi: 15.0 }));
    }

    #[test]
    fn test_single_zero_width_record_has_no_band() {
        let records = vec![ValuationRecord::new("A", 12.0, 12.0, 12.0)];
        assert_eq!(compute_overlap(&records), None);
    }

    #[test]
    fn test_intersecting_ranges() {
        let records = vec![range("A", 10.0, 15.0), range("B", 14.0, 20.0)];
        assert_eq!(compute_overlap(&records), Some(OverlapBand { lo: 14.0, hi: 15.0 }));
    }

    #[test]
    fn test_disjoint_ranges() {
        let records = vec![range("A", 10.0, 12.0), range("B", 14.0, 20.0)];
        assert_eq!(compute_overlap(&records), None);
    }

    #[test]
    fn test_touching_ranges_have_no_band() {
        let records = vec![range("A", 10.0, 14.0), range("B", 14.0, 20.0)];
        assert_eq!(compute_overlap(&records), None);
    }

    #[test]
    fn test_single_outlier_removes_band() {
        let records = vec![
            range("A", 10.0, 15.0),
            range("B", 11.0, 16.0),
            range("C", 30.0, 40.0),
        ];
        assert_eq!(compute_overlap(&records), None);
    }

    #[test]
    fn test_order_independent() {
        let records = vec![
            range("A", 10.0, 15.0),
            range("B", 14.0, 20.0),
            range("C", 12.0, 18.0),
        ];
        let expected = compute_overlap(&records);

        let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in permutations {
            let permuted: Vec<_> = order.iter().map(|&i| records[i].clone()).collect();
            assert_eq!(compute_overlap(&permuted), expected, "order {:?}", order);
        }
    }

    #[test]
    fn test_empty_slice_has_no_band() {
        assert_eq!(compute_overlap(&[]), None);
    }
}
