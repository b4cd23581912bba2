use crate::models::{OverlapBand, ValuationRecord};
use std::cmp::Ordering;

/// Order two optional discount rates ascending, with an absent rate after any present one.
///
/// `-0.0` and `0.0` compare equal so they tie like any other equal pair.
///
/// Absence is not zero: a record that states no discount rate is treated as
/// the least competitive bidder, never the most.
pub fn compare_discount_rates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Records whose `base` lies inside the band, or every record when none does.
pub fn candidate_pool<'a>(records: &'a [ValuationRecord], band: &OverlapBand) -> Vec<&'a ValuationRecord> {
    let in_band: Vec<_> = records.iter().filter(|r| band.contains(r.base)).collect();
    if in_band.is_empty() {
        records.iter().collect()
    } else {
        in_band
    }
}

/// Pick the heuristic "most likely winner".
///
/// No band means no winner. Otherwise the candidate pool (see
/// [`candidate_pool`]) is ranked by ascending discount rate and the first
/// record wins; equal rates keep their original relative order.
pub fn select_winner<'a>(
    records: &'a [ValuationRecord],
    band: Option<&OverlapBand>,
) -> Option<&'a ValuationRecord> {
    let band = band?;
    let mut pool = candidate_pool(records, band);
    pool.sort_by(|a, b| compare_discount_rates(a.discount_rate, b.discount_rate));
    pool.first().copied()
}
