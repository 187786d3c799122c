// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use karat_registry_api::{
    ACTOR_HEADER, ApiError, ApiResponse, BulkDeleteRequest, BulkDeleteResponse,
    BulkStatusRequest, BulkStatusResponse, ErrorResponse, KaratFieldsRequest, KaratInfo,
    ListKaratsRequest, authenticate_actor, bulk_delete_karats, bulk_update_karat_status,
    create_karat, get_karat, hard_delete_karat, list_karats, list_karats_by_division,
    restore_karat, soft_delete_karat, toggle_karat_status, update_karat,
};
use karat_registry_domain::ActorId;
use karat_registry_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Karat Registry Server - HTTP server for karat master data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Largest page size a list request may ask for
    #[arg(long, default_value_t = 100)]
    max_page_size: u64,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; each request holds it for the
/// duration of one handler call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    max_page_size: u64,
}

/// HTTP error wrapper.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Machine-readable error code.
    code: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode =
            StatusCode::from_u16(err.status_class()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(code = err.code(), error = %err, "Request rejected");
        }

        Self {
            status,
            code: err.code().to_string(),
            message: err.message(),
        }
    }
}

type HttpResult<T> = Result<Json<ApiResponse<T>>, HttpError>;

/// Resolves the acting identity from the request headers.
fn actor_from_headers(headers: &HeaderMap) -> Result<ActorId, HttpError> {
    let raw: Option<&str> = headers.get(ACTOR_HEADER).and_then(|v| v.to_str().ok());
    authenticate_actor(raw).map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Handler for POST `/karats` endpoint.
async fn handle_create_karat(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<KaratFieldsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<KaratInfo>>), HttpError> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, code = ?req.code, "Handling create_karat request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ApiResponse<KaratInfo> = create_karat(&mut persistence, req, &actor)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/karats` endpoint.
async fn handle_list_karats(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListKaratsRequest>,
) -> HttpResult<Vec<KaratInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_karats(
        &mut persistence,
        query,
        app_state.max_page_size,
    )?))
}

/// Handler for GET `/karats/division/{division_ref}` endpoint.
async fn handle_list_by_division(
    AxumState(app_state): AxumState<AppState>,
    Path(division_ref): Path<String>,
) -> HttpResult<Vec<KaratInfo>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_karats_by_division(&mut persistence, &division_ref)?))
}

/// Handler for GET `/karats/{id}` endpoint.
async fn handle_get_karat(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> HttpResult<KaratInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_karat(&mut persistence, &id)?))
}

/// Handler for PUT `/karats/{id}` endpoint.
async fn handle_update_karat(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<KaratFieldsRequest>,
) -> HttpResult<KaratInfo> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, karat_id = %id, "Handling update_karat request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_karat(&mut persistence, &id, req, &actor)?))
}

/// Handler for DELETE `/karats/{id}` endpoint (soft delete).
async fn handle_soft_delete_karat(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HttpResult<KaratInfo> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, karat_id = %id, "Handling soft_delete_karat request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(soft_delete_karat(&mut persistence, &id, &actor)?))
}

/// Handler for DELETE `/karats/{id}/permanent` endpoint.
async fn handle_hard_delete_karat(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HttpResult<()> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, karat_id = %id, "Handling hard_delete_karat request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hard_delete_karat(&mut persistence, &id)?))
}

/// Handler for POST `/karats/{id}/restore` endpoint.
async fn handle_restore_karat(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HttpResult<KaratInfo> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, karat_id = %id, "Handling restore_karat request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(restore_karat(&mut persistence, &id, &actor)?))
}

/// Handler for PATCH `/karats/{id}/toggle-status` endpoint.
async fn handle_toggle_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HttpResult<KaratInfo> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, karat_id = %id, "Handling toggle_status request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(toggle_karat_status(&mut persistence, &id, &actor)?))
}

/// Handler for POST `/karats/bulk-delete` endpoint.
async fn handle_bulk_delete(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkDeleteRequest>,
) -> HttpResult<BulkDeleteResponse> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(actor = %actor, requested = req.ids.len(), "Handling bulk_delete request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bulk_delete_karats(&mut persistence, req)?))
}

/// Handler for PATCH `/karats/bulk-status` endpoint.
async fn handle_bulk_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkStatusRequest>,
) -> HttpResult<BulkStatusResponse> {
    let actor: ActorId = actor_from_headers(&headers)?;
    info!(
        actor = %actor,
        requested = req.ids.len(),
        status = %req.status,
        "Handling bulk_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(bulk_update_karat_status(&mut persistence, req, &actor)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/karats", post(handle_create_karat).get(handle_list_karats))
        .route("/karats/bulk-delete", post(handle_bulk_delete))
        .route("/karats/bulk-status", patch(handle_bulk_status))
        .route("/karats/division/{division_ref}", get(handle_list_by_division))
        .route(
            "/karats/{id}",
            get(handle_get_karat)
                .put(handle_update_karat)
                .delete(handle_soft_delete_karat),
        )
        .route("/karats/{id}/permanent", delete(handle_hard_delete_karat))
        .route("/karats/{id}/restore", post(handle_restore_karat))
        .route("/karats/{id}/toggle-status", patch(handle_toggle_status))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Karat Registry Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        max_page_size: args.max_page_size,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
