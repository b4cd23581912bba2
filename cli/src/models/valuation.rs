use crate::error::{LoadError, RecordError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One investor's valuation view of the asset, in monetary units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationRecord {
    pub investor: String,
    pub low: f64,
    pub base: f64,
    pub high: f64,
    pub discount_rate: Option<f64>,
    pub exit_yield: Option<f64>,
    pub hold_years: Option<f64>,
    /// Authored rationale used when this record is the heuristic winner.
    pub profile: Option<String>,
    /// Authored explanation of what drives this investor's number.
    pub why: Option<String>,
}

impl ValuationRecord {
    pub fn new(investor: impl Into<String>, low: f64, base: f64, high: f64) -> Self {
        Self {
            investor: investor.into(),
            low,
            base,
            high,
            discount_rate: None,
            exit_yield: None,
            hold_years: None,
            profile: None,
            why: None,
        }
    }

    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = Some(rate);
        self
    }

    pub fn with_exit_yield(mut self, exit_yield: f64) -> Self {
        self.exit_yield = Some(exit_yield);
        self
    }

    pub fn with_hold_years(mut self, years: f64) -> Self {
        self.hold_years = Some(years);
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_why(mut self, why: impl Into<String>) -> Self {
        self.why = Some(why.into());
        self
    }

    /// Check the record invariants: a named investor, finite values and `low <= base <= high`.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.investor.trim().is_empty() {
            return Err(RecordError::EmptyInvestor);
        }

        let required = [("low", self.low), ("base", self.base), ("high", self.high)];
        let optional = [
            ("discount_rate", self.discount_rate),
            ("exit_yield", self.exit_yield),
            ("hold_years", self.hold_years),
        ];
        for (field, value) in required
            .into_iter()
            .chain(optional.into_iter().filter_map(|(f, v)| v.map(|v| (f, v))))
        {
            if !value.is_finite() {
                return Err(RecordError::NonFinite(field));
            }
        }

        if !(self.low <= self.base && self.base <= self.high) {
            return Err(RecordError::RangeOrder {
                investor: self.investor.clone(),
                low: self.low,
                base: self.base,
                high: self.high,
            });
        }

        Ok(())
    }
}

/// Non-empty, insertion-ordered set of records with unique investor names.
///
/// Only constructed through [`RecordSet::new`], so every instance holds the
/// invariants. There is no way to mutate a set once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<ValuationRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<ValuationRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| LoadError::InvalidRecord { index, source })?;
            if !seen.insert(record.investor.as_str()) {
                return Err(LoadError::DuplicateInvestor(record.investor.clone()));
            }
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ValuationRecord> {
        self.records.get(index)
    }

    pub fn position(&self, investor: &str) -> Option<usize> {
        self.records.iter().position(|r| r.investor == investor)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValuationRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ValuationRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ValuationRecord;
    type IntoIter = std::slice::Iter<'a, ValuationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Intersection of every record's `[low, high]` range, with `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapBand {
    pub lo: f64,
    pub hi: f64,
}

impl OverlapBand {
    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Raw record as it appears in a source document, before coercion.
///
/// Numeric fields stay as loose JSON values so that both numbers and numeric
/// strings (CSV cells, hand-written JSON) are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct RawValuationRecord {
    pub investor: Option<Value>,
    pub low: Option<Value>,
    pub base: Option<Value>,
    pub high: Option<Value>,
    pub discount_rate: Option<Value>,
    pub exit_yield: Option<Value>,
    pub hold_years: Option<Value>,
    pub profile: Option<String>,
    #[serde(alias = "rationale")]
    pub why: Option<String>,
}

impl RawValuationRecord {
    /// Coerce into a `ValuationRecord`; `index` is the record's position in the source.
    pub fn into_record(self, index: usize) -> Result<ValuationRecord, LoadError> {
        let investor = match self.investor {
            Some(Value::String(name)) => name.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(LoadError::InvalidInvestor {
                    index,
                    value: other.to_string(),
                })
            }
            None => {
                return Err(LoadError::MissingField {
                    index,
                    field: "investor",
                })
            }
        };

        let record = ValuationRecord {
            investor,
            low: required_number(self.low.as_ref(), index, "low")?,
            base: required_number(self.base.as_ref(), index, "base")?,
            high: required_number(self.high.as_ref(), index, "high")?,
            discount_rate: optional_number(self.discount_rate.as_ref(), index, "discount_rate")?,
            exit_yield: optional_number(self.exit_yield.as_ref(), index, "exit_yield")?,
            hold_years: optional_number(self.hold_years.as_ref(), index, "hold_years")?,
            profile: non_blank(self.profile),
            why: non_blank(self.why),
        };

        record
            .validate()
            .map_err(|source| LoadError::InvalidRecord { index, source })?;

        Ok(record)
    }
}

/// Numeric coercion shared by every field: JSON numbers and trimmed numeric text.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn required_number(value: Option<&Value>, index: usize, field: &'static str) -> Result<f64, LoadError> {
    let value = value.ok_or(LoadError::MissingField { index, field })?;
    coerce_number(value).ok_or_else(|| LoadError::NotNumeric {
        index,
        field,
        value: value.to_string(),
    })
}

fn optional_number(
    value: Option<&Value>,
    index: usize,
    field: &'static str,
) -> Result<Option<f64>, LoadError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => coerce_number(v).map(Some).ok_or_else(|| LoadError::NotNumeric {
            index,
            field,
            value: v.to_string(),
        }),
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
