use crate::data_structures::{
    AnswerResponse, AppState, ClientId, HealthResponse, OverlapResponse, RecordView, SelectRequest,
    SelectionResponse, SharedDataset, SharedSelections, SharedServiceInfo,
};
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, instrument, warn};
use valuation_explorer::analysis::answers::{QuestionKind, compose, compose_answer};
use valuation_explorer::analysis::overlap::compute_overlap;
use valuation_explorer::models::SelectionState;

pub fn router(state: AppState, cors_allow_any_origin: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/records", get(get_records_handler))
        .route("/overlap", get(get_overlap_handler))
        .route("/ask/{question}", get(ask_handler))
        .route(
            "/selection",
            get(get_selection_handler)
                .post(select_handler)
                .delete(clear_selection_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn current_selection(selections: &SharedSelections, client: &str) -> SelectionState {
    selections.lock().await.get(client).copied().unwrap_or_default()
}

#[instrument(skip_all)]
pub async fn health_handler(
    State(dataset): State<SharedDataset>,
    State(service): State<SharedServiceInfo>,
) -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok",
        service: (*service).clone(),
        record_count: dataset.records.len(),
        loaded_at: dataset.loaded_at,
    };
    (StatusCode::OK, Json(body))
}

#[instrument(skip(dataset))]
pub async fn get_records_handler(State(dataset): State<SharedDataset>) -> impl IntoResponse {
    let records: Vec<RecordView> = dataset
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| RecordView {
            index,
            record: record.clone(),
        })
        .collect();

    debug!(record_count = records.len(), "Returning records");
    (StatusCode::OK, Json(records))
}

#[instrument(skip(dataset))]
pub async fn get_overlap_handler(State(dataset): State<SharedDataset>) -> impl IntoResponse {
    let body = OverlapResponse {
        band: compute_overlap(dataset.records.as_slice()),
        answer: compose_answer(QuestionKind::Overlap, &dataset.records, &SelectionState::new()),
    };
    (StatusCode::OK, Json(body))
}

#[instrument(skip(dataset, selections))]
pub async fn ask_handler(
    State(dataset): State<SharedDataset>,
    State(selections): State<SharedSelections>,
    ClientId(client): ClientId,
    Path(question): Path<String>,
) -> impl IntoResponse {
    let selection = current_selection(&selections, &client).await;
    let answer = compose(&question, &dataset.records, &selection);
    if answer.is_empty() {
        debug!(question = %question, "Unknown question, answering with empty text");
    }
    (StatusCode::OK, Json(AnswerResponse { question, answer }))
}

#[instrument(skip(dataset, selections))]
pub async fn get_selection_handler(
    State(dataset): State<SharedDataset>,
    State(selections): State<SharedSelections>,
    ClientId(client): ClientId,
) -> impl IntoResponse {
    let selection = current_selection(&selections, &client).await;
    (StatusCode::OK, Json(SelectionResponse::new(&dataset.records, &selection, false)))
}

#[instrument(skip(dataset, selections, payload), fields(investor = %payload.investor))]
pub async fn select_handler(
    State(dataset): State<SharedDataset>,
    State(selections): State<SharedSelections>,
    ClientId(client): ClientId,
    Json(payload): Json<SelectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let investor = payload.investor.trim();
    if investor.is_empty() {
        return Err(ApiError::BadRequest("investor must not be empty".to_string()));
    }

    let mut selections = selections.lock().await;
    let mut selection = selections.get(&client).copied().unwrap_or_default();
    let changed = selection.select_investor(&dataset.records, investor).map_err(|e| {
        warn!(error = %e, "Rejected selection");
        ApiError::from(e)
    })?;
    selections.insert(client, selection);

    if changed {
        info!("Selection changed");
    }
    Ok((StatusCode::OK, Json(SelectionResponse::new(&dataset.records, &selection, changed))))
}

#[instrument(skip(dataset, selections))]
pub async fn clear_selection_handler(
    State(dataset): State<SharedDataset>,
    State(selections): State<SharedSelections>,
    ClientId(client): ClientId,
) -> impl IntoResponse {
    let previous = selections.lock().await.remove(&client);
    let changed = previous.is_some_and(|s| s.current().is_some());
    if changed {
        info!("Selection cleared");
    }
    (
        StatusCode::OK,
        Json(SelectionResponse::new(&dataset.records, &SelectionState::new(), changed)),
    )
}
