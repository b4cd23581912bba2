use super::valuation::{RecordSet, ValuationRecord};
use crate::error::SelectionError;

/// The record the user has currently picked, by position in its `RecordSet`.
///
/// Owned by the presentation layer and passed by reference into answer
/// composition. Starts out empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the record at `index`. Returns `Ok(false)` when it was already selected.
    pub fn select(&mut self, records: &RecordSet, index: usize) -> Result<bool, SelectionError> {
        if records.get(index).is_none() {
            return Err(SelectionError::OutOfBounds {
                index,
                len: records.len(),
            });
        }
        if self.selected == Some(index) {
            return Ok(false);
        }
        self.selected = Some(index);
        Ok(true)
    }

    pub fn select_investor(&mut self, records: &RecordSet, investor: &str) -> Result<bool, SelectionError> {
        let index = records
            .position(investor)
            .ok_or_else(|| SelectionError::UnknownInvestor(investor.to_string()))?;
        self.select(records, index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn current(&self) -> Option<usize> {
        self.selected
    }

    pub fn current_record<'r>(&self, records: &'r RecordSet) -> Option<&'r ValuationRecord> {
        self.selected.and_then(|index| records.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> RecordSet {
        RecordSet::new(vec![
            ValuationRecord::new("Harbour Capital", 10.0, 12.0, 15.0),
            ValuationRecord::new("Northgate", 14.0, 16.0, 20.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_starts_empty() {
        let state = SelectionState::new();
        assert_eq!(state.current(), None);
        assert!(state.current_record(&records()).is_none());
    }

    #[test]
    fn test_reselecting_is_a_no_op() {
        let records = records();
        let mut state = SelectionState::new();

        assert_eq!(state.select(&records, 1), Ok(true));
        let before = state;
        assert_eq!(state.select(&records, 1), Ok(false));
        assert_eq!(state, before);
        assert_eq!(state.current_record(&records).unwrap().investor, "Northgate");
    }

    #[test]
    fn test_select_by_investor() {
        let records = records();
        let mut state = SelectionState::new();

        assert_eq!(state.select_investor(&records, "Harbour Capital"), Ok(true));
        assert_eq!(state.current(), Some(0));
        assert_eq!(
            state.select_investor(&records, "Nobody"),
            Err(SelectionError::UnknownInvestor("Nobody".to_string()))
        );
        assert_eq!(state.current(), Some(0));
    }

    #[test]
    fn test_out_of_bounds_leaves_selection_unchanged() {
        let records = records();
        let mut state = SelectionState::new();
        state.select(&records, 0).unwrap();

        assert_eq!(
            state.select(&records, 5),
            Err(SelectionError::OutOfBounds { index: 5, len: 2 })
        );
        assert_eq!(state.current(), Some(0));

        state.clear();
        assert_eq!(state.current(), None);
    }
}
