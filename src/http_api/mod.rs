use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AgendaEntry, CareMetadata, CareSchedule, CompletionRecord, DaySummary, ScheduleItem,
    Transition,
};

#[derive(Clone)]
pub struct AppState {
    schedule: Arc<RwLock<CareSchedule>>,
}

impl AppState {
    pub fn new(schedule: CareSchedule) -> Self {
        Self {
            schedule: Arc::new(RwLock::new(schedule)),
        }
    }

    pub fn with_shared(schedule: Arc<RwLock<CareSchedule>>) -> Self {
        Self { schedule }
    }

    fn schedule(&self) -> Arc<RwLock<CareSchedule>> {
        self.schedule.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Conflict(message) => {
                let body = Json(ErrorBody {
                    error: "conflict",
                    message,
                });
                (StatusCode::CONFLICT, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TogglePayload {
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    transition: Transition,
    item: ScheduleItem,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/:id/completions", post(toggle_completion))
        .route("/agenda/:date", get(agenda_for_date))
        .route("/summary/:date", get(summary_for_date))
        .route("/history", get(list_history))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, schedule: CareSchedule) -> std::io::Result<()> {
    let state = AppState::new(schedule);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_metadata(State(state): State<AppState>) -> Json<CareMetadata> {
    let schedule = state.schedule();
    let metadata = {
        let guard = schedule.read();
        guard.metadata().clone()
    };
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<CareMetadata>,
) -> Json<CareMetadata> {
    let schedule = state.schedule();
    {
        let mut guard = schedule.write();
        guard.set_metadata(metadata.clone());
    }
    Json(metadata)
}

async fn list_items(State(state): State<AppState>) -> Json<Vec<ScheduleItem>> {
    let schedule = state.schedule();
    let items = {
        let guard = schedule.read();
        guard.items().to_vec()
    };
    Json(items)
}

async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ScheduleItem>, ApiError> {
    let schedule = state.schedule();
    let result = {
        let guard = schedule.read();
        guard.find_item(&item_id).cloned()
    };
    match result {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::not_found(format!("item {item_id} not found"))),
    }
}

async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<ScheduleItem>,
) -> Result<(StatusCode, Json<ScheduleItem>), ApiError> {
    let schedule = state.schedule();
    {
        let mut guard = schedule.write();
        if guard.find_item(&item.id).is_some() {
            return Err(ApiError::Conflict(format!(
                "item {} already exists",
                item.id
            )));
        }
        guard
            .upsert_item(item.clone())
            .map_err(|err| ApiError::invalid(err.to_string()))?;
    }
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(item): Json<ScheduleItem>,
) -> Result<Json<ScheduleItem>, ApiError> {
    if item.id != item_id {
        return Err(ApiError::invalid(
            "item id in payload does not match path parameter",
        ));
    }
    let schedule = state.schedule();
    {
        let mut guard = schedule.write();
        if guard.find_item(&item_id).is_none() {
            return Err(ApiError::not_found(format!("item {item_id} not found")));
        }
        guard
            .upsert_item(item.clone())
            .map_err(|err| ApiError::invalid(err.to_string()))?;
    }
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let schedule = state.schedule();
    let removed = {
        let mut guard = schedule.write();
        guard.delete_item(&item_id)
    };
    if !removed {
        return Err(ApiError::not_found(format!("item {item_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_completion(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(payload): Json<TogglePayload>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let schedule = state.schedule();
    let (transition, item) = {
        let mut guard = schedule.write();
        let transition = guard
            .toggle_completion(&item_id, payload.date)
            .ok_or_else(|| ApiError::not_found(format!("item {item_id} not found")))?;
        let item = guard
            .find_item(&item_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("item {item_id} not found")))?;
        (transition, item)
    };
    Ok(Json(ToggleResponse { transition, item }))
}

async fn agenda_for_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<Vec<AgendaEntry>> {
    let schedule = state.schedule();
    let entries = {
        let guard = schedule.read();
        guard.agenda_for_date(date)
    };
    Json(entries)
}

async fn summary_for_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<DaySummary> {
    let schedule = state.schedule();
    let summary = {
        let guard = schedule.read();
        guard.day_summary(date)
    };
    Json(summary)
}

async fn list_history(State(state): State<AppState>) -> Json<Vec<CompletionRecord>> {
    let schedule = state.schedule();
    let history = {
        let guard = schedule.read();
        guard.history().to_vec()
    };
    Json(history)
}
