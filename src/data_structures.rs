use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use valuation_explorer::analysis::answers::format_record_detail;
use valuation_explorer::api::ValuationAnalyzer;
use valuation_explorer::models::{RecordSet, SelectionState, ValuationRecord};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
pub const DEFAULT_CLIENT_ID: &str = "default";

// --- Shared State ---

/// The record set loaded at startup. Immutable, so handlers read it without locking.
#[derive(Debug)]
pub struct Dataset {
    pub records: RecordSet,
    pub loaded_at: DateTime<Utc>,
}
pub type SharedDataset = Arc<Dataset>;

// One selection per client, keyed by the `x-client-id` header
pub type SharedSelections = Arc<Mutex<HashMap<String, SelectionState>>>;

#[derive(Clone, Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub environment: String,
}
pub type SharedServiceInfo = Arc<ServiceInfo>;

#[derive(Clone)]
pub struct AppState {
    pub dataset: SharedDataset,
    pub selections: SharedSelections,
    pub service: SharedServiceInfo,
}

impl AppState {
    pub fn new(analyzer: ValuationAnalyzer, service: ServiceInfo) -> Self {
        let dataset = Dataset {
            records: analyzer.records().clone(),
            loaded_at: analyzer.loaded_at(),
        };
        Self {
            dataset: Arc::new(dataset),
            selections: Arc::new(Mutex::new(HashMap::new())),
            service: Arc::new(service),
        }
    }
}

impl FromRef<AppState> for SharedDataset {
    fn from_ref(app_state: &AppState) -> SharedDataset {
        app_state.dataset.clone()
    }
}

impl FromRef<AppState> for SharedSelections {
    fn from_ref(app_state: &AppState) -> SharedSelections {
        app_state.selections.clone()
    }
}

impl FromRef<AppState> for SharedServiceInfo {
    fn from_ref(app_state: &AppState) -> SharedServiceInfo {
        app_state.service.clone()
    }
}

/// Caller identity for selection state. A missing or blank header maps to [`DEFAULT_CLIENT_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CLIENT_ID);
        Ok(ClientId(id.to_string()))
    }
}

// --- Response Bodies ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: ServiceInfo,
    pub record_count: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RecordView {
    pub index: usize,
    #[serde(flatten)]
    pub record: ValuationRecord,
}

#[derive(Debug, Serialize)]
pub struct OverlapResponse {
    pub band: Option<valuation_explorer::models::OverlapBand>,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub investor: Option<String>,
    pub detail: Option<String>,
    pub changed: bool,
}

impl SelectionResponse {
    pub fn new(records: &RecordSet, selection: &SelectionState, changed: bool) -> Self {
        let record = selection.current_record(records);
        Self {
            investor: record.map(|r| r.investor.clone()),
            detail: record.map(format_record_detail),
            changed,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SelectRequest {
    pub investor: String,
}
