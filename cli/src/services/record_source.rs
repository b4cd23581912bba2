use crate::{
    error::LoadError,
    models::{RawValuationRecord, RecordSet},
    utils::{Logger, Timer},
};
use serde_json::{Map, Value};
use std::{path::PathBuf, time::Duration};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a record set comes from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    File(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl RecordSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            RecordSource::Url(source.to_string())
        } else {
            RecordSource::File(PathBuf::from(source))
        }
    }

    /// `.csv` sources are CSV; everything else is read as JSON.
    pub fn format(&self) -> SourceFormat {
        let is_csv = match self {
            RecordSource::File(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")),
            RecordSource::Url(url) => url
                .split(['?', '#'])
                .next()
                .is_some_and(|path| path.to_ascii_lowercase().ends_with(".csv")),
        };
        if is_csv {
            SourceFormat::Csv
        } else {
            SourceFormat::Json
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RecordSource::File(path) => path.display().to_string(),
            RecordSource::Url(url) => url.clone(),
        }
    }
}

/// Loads a record set once, failing fast on the first bad record.
pub struct RecordLoader {
    client: reqwest::Client,
    logger: Logger,
}

impl RecordLoader {
    pub fn new() -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self {
            client,
            logger: Logger::new("RECORD_SOURCE"),
        })
    }

    pub async fn load(&self, source: &RecordSource) -> Result<RecordSet, LoadError> {
        let timer = Timer::start("record load");
        self.logger.info(&format!("Loading records from {}", source.describe()));

        let result = self
            .read(source)
            .await
            .and_then(|content| match source.format() {
                SourceFormat::Json => parse_json_records(&content),
                SourceFormat::Csv => parse_csv_records(&content),
            });

        match &result {
            Ok(records) => {
                self.logger.info(&format!(
                    "Loaded {} records from {}",
                    records.len(),
                    source.describe()
                ));
                timer.log_elapsed(self.logger.context());
            }
            Err(e) => self.logger.error_with_error("Record load failed", e),
        }

        result
    }

    async fn read(&self, source: &RecordSource) -> Result<String, LoadError> {
        match source {
            RecordSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                }),
            RecordSource::Url(url) => {
                self.logger.debug(&format!("Fetching {}", url));
                let http_error = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let response = self.client.get(url).send().await.map_err(http_error)?;
                let status = response.status();
                if !status.is_success() {
                    self.logger.warn(&format!("{} answered with status {}", url, status));
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.text().await.map_err(http_error)
            }
        }
    }
}

/// Load a record set from `source` with a default loader.
pub async fn load_records(source: &RecordSource) -> Result<RecordSet, LoadError> {
    RecordLoader::new()?.load(source).await
}

/// Parse a JSON document: a top-level array of records, or `{"records": [...]}`.
pub fn parse_json_records(content: &str) -> Result<RecordSet, LoadError> {
    let items = match serde_json::from_str::<Value>(content)? {
        Value::Array(items) => items,
        Value::Object(mut document) => match document.remove("records") {
            Some(Value::Array(items)) => items,
            _ => return Err(LoadError::UnexpectedShape),
        },
        _ => return Err(LoadError::UnexpectedShape),
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawValuationRecord = serde_json::from_value(item)?;
            raw.into_record(index)
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    RecordSet::new(records)
}

/// Parse CSV with a header row. Empty cells count as absent.
pub fn parse_csv_records(content: &str) -> Result<RecordSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();

        let raw: RawValuationRecord = serde_json::from_value(Value::Object(fields))?;
        records.push(raw.into_record(index)?);
    }

    RecordSet::new(records)
}
