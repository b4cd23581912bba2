use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a record set from a source.
///
/// Every variant is terminal for the session: there is no partial record set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV document: {0}")]
    Csv(#[from] csv::Error),

    #[error("document must be an array of records or an object with a `records` array")]
    UnexpectedShape,

    #[error("record set is empty")]
    Empty,

    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: investor must be text (got {value})")]
    InvalidInvestor { index: usize, value: String },

    #[error("record {index}: field `{field}` is not numeric (got {value})")]
    NotNumeric {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("duplicate investor `{0}`")]
    DuplicateInvestor(String),
}

/// A record whose values break the `ValuationRecord` invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("investor name is empty")]
    EmptyInvestor,

    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),

    #[error("range out of order for `{investor}`: low {low}, base {base}, high {high}")]
    RangeOrder {
        investor: String,
        low: f64,
        base: f64,
        high: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no investor named `{0}`")]
    UnknownInvestor(String),

    #[error("record index {index} is out of bounds for {len} records")]
    OutOfBounds { index: usize, len: usize },
}
