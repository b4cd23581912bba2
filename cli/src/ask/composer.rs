use super::types::QuestionKind;
use crate::models::{RecordSet, SelectionState, ValuationRecord};
use crate::utils::{compute_overlap, format_money, format_money_range, select_winner};
use std::cmp::Ordering;
use tracing::debug;

// Fallback copy used when a record carries no authored text.

pub const HIGHEST_FALLBACK: &str =
    "A lower cost of capital and a willingness to pay a premium for durability and scarcity.";
pub const LOWEST_FALLBACK: &str =
    "Higher required returns and more aggressive pricing of risk.";
pub const WINNER_FALLBACK: &str =
    "Patient capital with a lower cost of capital, bidding inside the overlap band.";

pub const NO_OVERLAP_MESSAGE: &str =
    "No overlap band: the investors' valuation ranges do not all intersect.";
pub const WINNER_UNCLEAR_MESSAGE: &str =
    "Most likely winner is unclear: there is no overlap band across the valuation ranges. \
     Try narrowing the set to investors whose ranges intersect.";

/// Answer `question` for `records`. Unknown questions produce an empty string.
pub fn compose(question: &str, records: &RecordSet, selection: &SelectionState) -> String {
    match QuestionKind::parse(question) {
        Some(kind) => compose_answer(kind, records, selection),
        None => {
            debug!(question, "Ignoring unknown question");
            String::new()
        }
    }
}

/// Answer one of the fixed questions. Pure: the text is returned, never printed.
pub fn compose_answer(kind: QuestionKind, records: &RecordSet, selection: &SelectionState) -> String {
    debug!(
        question = %kind,
        selected = ?selection.current_record(records).map(|r| r.investor.as_str()),
        "Composing answer"
    );

    let records = records.as_slice();
    match kind {
        QuestionKind::Overlap => match compute_overlap(records) {
            Some(band) => format!(
                "Overlap band: {}. Every investor's stated range accepts a price in this band.",
                format_money_range(band.lo, band.hi)
            ),
            None => NO_OVERLAP_MESSAGE.to_string(),
        },
        QuestionKind::Highest => highest_base(records)
            .map(|r| describe_extreme("Highest", r, HIGHEST_FALLBACK))
            .unwrap_or_default(),
        QuestionKind::Lowest => lowest_base(records)
            .map(|r| describe_extreme("Lowest", r, LOWEST_FALLBACK))
            .unwrap_or_default(),
        QuestionKind::Winner => {
            let band = compute_overlap(records);
            match select_winner(records, band.as_ref()) {
                Some(winner) => format!(
                    "Most likely winner (heuristic): {}. {}",
                    winner.investor,
                    winner.profile.as_deref().unwrap_or(WINNER_FALLBACK)
                ),
                None => WINNER_UNCLEAR_MESSAGE.to_string(),
            }
        }
    }
}

/// Record with the greatest `base`; the first one wins a tie.
pub fn highest_base(records: &[ValuationRecord]) -> Option<&ValuationRecord> {
    // min_by keeps the first of equal elements, so reverse the comparison.
    records.iter().min_by(|a, b| compare_bases(b.base, a.base))
}

/// Record with the smallest `base`; the first one wins a tie.
pub fn lowest_base(records: &[ValuationRecord]) -> Option<&ValuationRecord> {
    records.iter().min_by(|a, b| compare_bases(a.base, b.base))
}

// Record values are finite, so only signed zeros need care: they must tie.
fn compare_bases(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn describe_extreme(label: &str, record: &ValuationRecord, fallback: &str) -> String {
    format!(
        "{} valuation: {} at {}. Driver: {}",
        label,
        record.investor,
        format_money(record.base),
        record.why.as_deref().unwrap_or(fallback)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(records: Vec<ValuationRecord>) -> RecordSet {
        RecordSet::new(records).unwrap()
    }

    fn sample() -> RecordSet {
        set(vec![
            ValuationRecord::new("Harbour Capital", 10.0, 14.5, 15.0)
                .with_discount_rate(4.0)
                .with_profile("Core-plus buyer with a long hold horizon."),
            ValuationRecord::new("Northgate", 14.0, 18.0, 20.0)
                .with_discount_rate(2.0)
                .with_why("Sees rental growth others miss."),
            ValuationRecord::new("Millbrook", 12.0, 14.2, 16.0),
        ])
    }

    #[test]
    fn test_overlap_answer_contains_band() {
        let answer = compose("overlap", &sample(), &SelectionState::new());
        assert!(answer.contains("£14.00m"), "{}", answer);
        assert!(answer.contains("£15.00m"), "{}", answer);
    }

    #[test]
    fn test_overlap_answer_without_band() {
        let records = set(vec![
            ValuationRecord::new("A", 10.0, 11.0, 12.0),
            ValuationRecord::new("B", 14.0, 15.0, 20.0),
        ]);
        assert_eq!(compose("overlap", &records, &SelectionState::new()), NO_OVERLAP_MESSAGE);
    }

    #[test]
    fn test_highest_uses_authored_driver() {
        let answer = compose("highest", &sample(), &SelectionState::new());
        assert_eq!(
            answer,
            "Highest valuation: Northgate at £18.00m. Driver: Sees rental growth others miss."
        );
    }

    #[test]
    fn test_lowest_uses_fallback_driver() {
        let answer = compose("lowest", &sample(), &SelectionState::new());
        assert_eq!(
            answer,
            format!("Lowest valuation: Millbrook at £14.20m. Driver: {}", LOWEST_FALLBACK)
        );
    }

    #[test]
    fn test_highest_tie_picks_first_in_order() {
        let records = set(vec![
            ValuationRecord::new("Low", 1.0, 5.0, 20.0),
            ValuationRecord::new("FirstTop", 1.0, 10.0, 20.0),
            ValuationRecord::new("SecondTop", 1.0, 10.0, 20.0),
        ]);
        let answer = compose("highest", &records, &SelectionState::new());
        assert!(answer.contains("FirstTop"), "{}", answer);
        assert_eq!(highest_base(records.as_slice()).unwrap().investor, "FirstTop");
    }

    #[test]
    fn test_lowest_tie_picks_first_in_order() {
        let records = set(vec![
            ValuationRecord::new("FirstLow", 1.0, 5.0, 20.0),
            ValuationRecord::new("SecondLow", 1.0, 5.0, 20.0),
        ]);
        assert_eq!(lowest_base(records.as_slice()).unwrap().investor, "FirstLow");
    }

    #[test]
    fn test_highest_fallback_driver() {
        let records = set(vec![ValuationRecord::new("Solo", 1.0, 2.0, 3.0)]);
        let answer = compose("highest", &records, &SelectionState::new());
        assert!(answer.ends_with(HIGHEST_FALLBACK), "{}", answer);
    }

    #[test]
    fn test_winner_is_framed_as_heuristic() {
        let answer = compose("winner", &sample(), &SelectionState::new());
        assert_eq!(
            answer,
            "Most likely winner (heuristic): Harbour Capital. Core-plus buyer with a long hold horizon."
        );
    }

    #[test]
    fn test_winner_fallback_profile() {
        let records = set(vec![
            ValuationRecord::new("A", 10.0, 12.0, 15.0).with_discount_rate(3.0),
            ValuationRecord::new("B", 11.0, 13.0, 16.0),
        ]);
        let answer = compose("winner", &records, &SelectionState::new());
        assert_eq!(answer, format!("Most likely winner (heuristic): A. {}", WINNER_FALLBACK));
    }

    #[test]
    fn test_winner_unclear_without_band() {
        let records = set(vec![
            ValuationRecord::new("A", 10.0, 11.0, 12.0).with_discount_rate(1.0),
            ValuationRecord::new("B", 14.0, 15.0, 20.0),
        ]);
        assert_eq!(compose("winner", &records, &SelectionState::new()), WINNER_UNCLEAR_MESSAGE);
    }

    #[test]
    fn test_unknown_question_is_empty() {
        assert_eq!(compose("median", &sample(), &SelectionState::new()), "");
        assert_eq!(compose("", &sample(), &SelectionState::new()), "");
    }

    #[test]
    fn test_question_names_are_exact() {
        let selection = SelectionState::new();
        assert_eq!(compose("Overlap", &sample(), &selection), "");
        assert_eq!(compose("OVERLAP", &sample(), &selection), "");
        assert_eq!(compose(" winner ", &sample(), &selection), "");
        assert!(!compose("winner", &sample(), &selection).is_empty());
    }

    #[test]
    fn test_signed_zero_bases_tie() {
        let records = set(vec![
            ValuationRecord::new("First", -1.0, -0.0, 1.0).with_discount_rate(0.0),
            ValuationRecord::new("Second", -1.0, 0.0, 1.0).with_discount_rate(-0.0),
        ]);
        assert_eq!(highest_base(records.as_slice()).unwrap().investor, "First");
        assert_eq!(lowest_base(records.as_slice()).unwrap().investor, "First");
        assert_eq!(
            compose("winner", &records, &SelectionState::new()),
            format!("Most likely winner (heuristic): First. {}", WINNER_FALLBACK)
        );
    }

    #[test]
    fn test_selection_does_not_change_answers() {
        let records = sample();
        let mut selection = SelectionState::new();
        let before: Vec<_> = QuestionKind::ALL
            .iter()
            .map(|&k| compose_answer(k, &records, &selection))
            .collect();

        selection.select_investor(&records, "Millbrook").unwrap();
        let after: Vec<_> = QuestionKind::ALL
            .iter()
            .map(|&k| compose_answer(k, &records, &selection))
            .collect();

        assert_eq!(before, after);
    }
}
