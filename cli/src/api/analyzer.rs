//! High-level valuation analyzer for easy library usage

use crate::ask::{compose, compose_answer, format_record_detail, QuestionKind};
use crate::error::{LoadError, SelectionError};
use crate::models::{OverlapBand, RecordSet, SelectionState, ValuationRecord};
use crate::services::{load_records, RecordSource};
use crate::utils::{compute_overlap, select_winner};
use chrono::{DateTime, Utc};

/// One session over a single asset's valuation ranges.
///
/// Owns the record set (immutable once loaded) and the user's selection.
/// The record set never changes after construction; the selection is the
/// only state that does.
#[derive(Debug, Clone)]
pub struct ValuationAnalyzer {
    records: RecordSet,
    selection: SelectionState,
    loaded_at: DateTime<Utc>,
}

impl ValuationAnalyzer {
    /// Load records from `source`. Any failure is terminal for the session.
    pub async fn load(source: &RecordSource) -> Result<Self, LoadError> {
        let records = load_records(source).await?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: RecordSet) -> Self {
        Self {
            records,
            selection: SelectionState::new(),
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn overlap(&self) -> Option<OverlapBand> {
        compute_overlap(self.records.as_slice())
    }

    pub fn winner(&self) -> Option<&ValuationRecord> {
        let band = self.overlap();
        select_winner(self.records.as_slice(), band.as_ref())
    }

    /// Answer a question by wire name; unknown names give an empty string.
    pub fn ask(&self, question: &str) -> String {
        compose(question, &self.records, &self.selection)
    }

    pub fn answer(&self, kind: QuestionKind) -> String {
        compose_answer(kind, &self.records, &self.selection)
    }

    /// Every fixed question with its answer, in display order.
    pub fn answer_all(&self) -> Vec<(QuestionKind, String)> {
        QuestionKind::ALL
            .iter()
            .map(|&kind| (kind, self.answer(kind)))
            .collect()
    }

    /// Returns `Ok(false)` when `investor` was already selected.
    pub fn select_investor(&mut self, investor: &str) -> Result<bool, SelectionError> {
        let changed = self.selection.select_investor(&self.records, investor)?;
        if changed {
            tracing::info!(investor, "Selection changed");
        }
        Ok(changed)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<&ValuationRecord> {
        self.selection.current_record(&self.records)
    }

    pub fn selected_detail(&self) -> Option<String> {
        self.selected().map(format_record_detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ValuationAnalyzer {
        ValuationAnalyzer::from_records(
            RecordSet::new(vec![
                ValuationRecord::new("Harbour Capital", 10.0, 14.5, 15.0).with_discount_rate(4.0),
                ValuationRecord::new("Northgate", 14.0, 18.0, 20.0).with_discount_rate(2.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_overlap_and_winner() {
        let analyzer = analyzer();
        assert_eq!(analyzer.overlap(), Some(OverlapBand { lo: 14.0, hi: 15.0 }));
        assert_eq!(analyzer.winner().unwrap().investor, "Harbour Capital");
    }

    #[test]
    fn test_answer_all_is_in_fixed_order() {
        let kinds: Vec<_> = analyzer().answer_all().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, QuestionKind::ALL.to_vec());
    }

    #[test]
    fn test_ask_matches_answer() {
        let analyzer = analyzer();
        assert_eq!(analyzer.ask("winner"), analyzer.answer(QuestionKind::Winner));
        assert_eq!(analyzer.ask("unknown"), "");
    }

    #[test]
    fn test_selection_lifecycle() {
        let mut analyzer = analyzer();
        assert!(analyzer.selected().is_none());
        assert!(analyzer.selected_detail().is_none());

        assert_eq!(analyzer.select_investor("Northgate"), Ok(true));
        assert_eq!(analyzer.select_investor("Northgate"), Ok(false));
        assert_eq!(analyzer.selected().unwrap().investor, "Northgate");
        assert!(analyzer
            .selected_detail()
            .unwrap()
            .contains("Range: £14.00m to £20.00m (base £18.00m)"));

        assert!(analyzer.select_investor("Nobody").is_err());
        assert_eq!(analyzer.selected().unwrap().investor, "Northgate");

        analyzer.clear_selection();
        assert!(analyzer.selected().is_none());
    }
}
