// Vetsoft - REST API with Axum
//
// Every entity gets the same three endpoints:
//   GET  /api/{table}      repository view (all records)
//   GET  /api/{table}/:id  edit view (one record, 404 when missing)
//   POST /api/{table}      form post; an `id` field edits, otherwise creates

use crate::db;
use crate::entities::{Client, Medicine, Pet, Product, Provider, Record, Specialty, Vet};
use crate::error::RecordError;
use crate::validation::{field, FieldErrors, FormData};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // Every write is a single statement, so a poisoned lock is still usable
        self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: String, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            errors,
        }
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecordError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            RecordError::Database(e) => {
                error!(error = %e, "database error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let errors = self.field_errors().cloned();
        (status, Json(ApiResponse::failure(self.to_string(), errors))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/vets/specialties - Choices for the vet form
async fn list_specialties() -> impl IntoResponse {
    Json(ApiResponse::ok(Specialty::ALL.map(|s| s.as_str())))
}

async fn list_records<R: Record + Send + 'static>(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<R>>>, RecordError> {
    let records = db::list::<R>(&state.conn())?;
    Ok(Json(ApiResponse::ok(records)))
}

async fn show_record<R: Record + Send + 'static>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<R>>, RecordError> {
    let record = db::find::<R>(&state.conn(), id)?;
    Ok(Json(ApiResponse::ok(record)))
}

async fn save_record<R: Record + Send + 'static>(
    State(state): State<AppState>,
    Form(data): Form<FormData>,
) -> Result<(StatusCode, Json<ApiResponse<R>>), RecordError> {
    let status = if field(&data, "id").is_empty() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let record = db::save::<R>(&state.conn(), &data)?;
    Ok((status, Json(ApiResponse::ok(record))))
}

fn record_routes<R: Record + Send + 'static>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}", R::TABLE),
            get(list_records::<R>).post(save_record::<R>),
        )
        .route(&format!("/{}/:id", R::TABLE), get(show_record::<R>))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/vets/specialties", get(list_specialties))
        .merge(record_routes::<Client>())
        .merge(record_routes::<Pet>())
        .merge(record_routes::<Medicine>())
        .merge(record_routes::<Product>())
        .merge(record_routes::<Provider>())
        .merge(record_routes::<Vet>())
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
