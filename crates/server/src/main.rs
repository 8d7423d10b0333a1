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
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use clap::Parser;
use fireshift_api::{
    ApiError, ApplyRequest, ApplyResponse, ApproveExchangeResponse, ApproveReplacementRequest,
    ApproveReplacementResponse, AuthenticatedActor, CancelExchangeResponse,
    CancelReplacementResponse, CompleteElapsedResponse, CreateReplacementRequest, CycleConfigInfo,
    CycleDayResponse, ExchangeInfo, GetReplacementResponse, GuardCheckRequest, GuardCheckResponse,
    LogHook, LogNotifier, RejectApplicationResponse, RejectExchangeResponse, ReplacementInfo,
    RequestExchangeRequest, RequestExchangeResponse, Role, SetCycleConfigRequest,
    UnassignResponse, apply_to_replacement, approve_exchange, approve_replacement,
    cancel_exchange, cancel_replacement, check_guard, complete_elapsed_replacements,
    create_replacement, get_cycle_config, get_cycle_day, get_exchange, get_replacement,
    list_exchanges_for_user, list_replacements, reject_application, reject_exchange,
    request_exchange, set_cycle_config, unassign_replacement,
};
use fireshift_core::ExchangeLeg;
use fireshift_domain::{PartialWindow, ReplacementStatus, ShiftType};
use fireshift_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// FireShift Server - HTTP server for the fire station scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the roster and workflow records.
    persistence: Arc<Mutex<Persistence>>,
}

/// Actor identification carried on every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
}

/// API request for setting the cycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetCycleConfigApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The epoch date (cycle day 1).
    start_date: NaiveDate,
    /// Length of the repeating cycle in days.
    cycle_length_days: u16,
    /// Whether the rotation is active.
    active: bool,
}

/// Query parameters for the cycle day lookup.
#[derive(Debug, Deserialize)]
struct CycleDayQuery {
    /// The date to look up.
    date: NaiveDate,
}

/// API request for the consecutive-hours probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GuardCheckApiRequest {
    /// The person whose schedule is checked.
    user_id: i64,
    /// The candidate shift date.
    shift_date: NaiveDate,
    /// The candidate shift shape.
    shift_type: ShiftType,
    /// Optional narrowing of the candidate shift.
    partial: Option<PartialWindow>,
}

/// API request for opening a replacement.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateReplacementApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The absent person, or absent for an extra staffing slot.
    absent_user_id: Option<i64>,
    /// The team whose shift needs covering.
    team_id: i64,
    /// The shift date.
    shift_date: NaiveDate,
    /// The shift shape.
    shift_type: ShiftType,
    /// Optional narrowing of the shift.
    partial: Option<PartialWindow>,
    /// Free-text reason.
    reason: Option<String>,
}

/// Query parameters for listing replacements.
#[derive(Debug, Deserialize)]
struct ListReplacementsQuery {
    /// Optional status filter.
    status: Option<String>,
}

/// API request for applying as a substitute.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApplyApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The applicant.
    applicant_id: i64,
}

/// API request for approving an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApproveApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The applicant to assign.
    applicant_id: i64,
    /// Override a consecutive-hours guard failure.
    #[serde(default)]
    force: bool,
}

/// API request for the elapsed-replacement sweep.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CompleteElapsedApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// Replacements dated strictly before this date are completed.
    today: NaiveDate,
}

/// API request for proposing an exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RequestExchangeApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// The person initiating the swap.
    requester_id: i64,
    /// The person asked to swap.
    target_id: i64,
    /// The requester's own shift.
    requester_leg: ExchangeLeg,
    /// The target's shift.
    target_leg: ExchangeLeg,
    /// Free-text reason.
    reason: Option<String>,
    /// Override the yearly quota cap.
    #[serde(default)]
    force: bool,
}

/// API request for rejecting an exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RejectExchangeApiRequest {
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
    /// Grounds for the rejection.
    reason: Option<String>,
}

/// Query parameters for listing a user's exchanges.
#[derive(Debug, Deserialize)]
struct ListExchangesQuery {
    /// The user whose exchanges to list.
    user_id: i64,
    /// The acting user's ID.
    actor_id: i64,
    /// The role of the actor.
    actor_role: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::WorkflowRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "firefighter" => Ok(Role::Firefighter),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: '{role_str}'. Must be 'admin' or 'firefighter'"),
        }),
    }
}

/// Builds an authenticated actor from request identification fields.
fn authenticate(actor_id: i64, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(actor_role)?;
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Handler for POST `/cycle_config` endpoint.
async fn handle_set_cycle_config(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SetCycleConfigApiRequest>,
) -> Result<Json<CycleConfigInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        start_date = %req.start_date,
        cycle_length_days = req.cycle_length_days,
        "Handling set_cycle_config request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;
    let request: SetCycleConfigRequest = SetCycleConfigRequest {
        start_date: req.start_date,
        cycle_length_days: req.cycle_length_days,
        active: req.active,
    };

    let mut persistence = app_state.persistence.lock().await;
    let info: CycleConfigInfo = set_cycle_config(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for GET `/cycle_config` endpoint.
async fn handle_get_cycle_config(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CycleConfigInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: CycleConfigInfo = get_cycle_config(&mut persistence)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for GET `/cycle_day` endpoint.
async fn handle_get_cycle_day(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CycleDayQuery>,
) -> Result<Json<CycleDayResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CycleDayResponse = get_cycle_day(&mut persistence, query.date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/guard_check` endpoint.
///
/// Read-only probe: reports what the consecutive-hours guard would say
/// about a hypothetical shift.
async fn handle_guard_check(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GuardCheckApiRequest>,
) -> Result<Json<GuardCheckResponse>, HttpError> {
    let request: GuardCheckRequest = GuardCheckRequest {
        user_id: req.user_id,
        shift_date: req.shift_date,
        shift_type: req.shift_type,
        partial: req.partial,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GuardCheckResponse = check_guard(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements` endpoint.
async fn handle_create_replacement(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateReplacementApiRequest>,
) -> Result<Json<ReplacementInfo>, HttpError> {
    info!(
        actor_id = req.actor_id,
        team_id = req.team_id,
        shift_date = %req.shift_date,
        "Handling create_replacement request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;
    let request: CreateReplacementRequest = CreateReplacementRequest {
        absent_user_id: req.absent_user_id,
        team_id: req.team_id,
        shift_date: req.shift_date,
        shift_type: req.shift_type,
        partial: req.partial,
        reason: req.reason,
    };

    let mut persistence = app_state.persistence.lock().await;
    let info: ReplacementInfo =
        create_replacement(&mut persistence, request, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for GET `/replacements` endpoint.
async fn handle_list_replacements(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListReplacementsQuery>,
) -> Result<Json<Vec<ReplacementInfo>>, HttpError> {
    let status: Option<ReplacementStatus> = query
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|err| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid status filter: {err}"),
        })?;

    let mut persistence = app_state.persistence.lock().await;
    let replacements: Vec<ReplacementInfo> = list_replacements(&mut persistence, status)?;
    drop(persistence);

    Ok(Json(replacements))
}

/// Handler for GET `/replacements/{replacement_id}` endpoint.
async fn handle_get_replacement(
    AxumState(app_state): AxumState<AppState>,
    Path(replacement_id): Path<i64>,
) -> Result<Json<GetReplacementResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetReplacementResponse = get_replacement(&mut persistence, replacement_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements/{replacement_id}/apply` endpoint.
async fn handle_apply(
    AxumState(app_state): AxumState<AppState>,
    Path(replacement_id): Path<i64>,
    Json(req): Json<ApplyApiRequest>,
) -> Result<Json<ApplyResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        replacement_id = replacement_id,
        applicant_id = req.applicant_id,
        "Handling apply request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;
    let request: ApplyRequest = ApplyRequest {
        replacement_id,
        applicant_id: req.applicant_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplyResponse =
        apply_to_replacement(&mut persistence, &request, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements/{replacement_id}/approve` endpoint.
async fn handle_approve_replacement(
    AxumState(app_state): AxumState<AppState>,
    Path(replacement_id): Path<i64>,
    Json(req): Json<ApproveApiRequest>,
) -> Result<Json<ApproveReplacementResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        replacement_id = replacement_id,
        applicant_id = req.applicant_id,
        force = req.force,
        "Handling approve_replacement request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;
    let request: ApproveReplacementRequest = ApproveReplacementRequest {
        replacement_id,
        applicant_id: req.applicant_id,
        force: req.force,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ApproveReplacementResponse =
        approve_replacement(&mut persistence, &request, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements/{replacement_id}/unassign` endpoint.
async fn handle_unassign(
    AxumState(app_state): AxumState<AppState>,
    Path(replacement_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<UnassignResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: UnassignResponse = unassign_replacement(
        &mut persistence,
        replacement_id,
        &actor,
        &LogNotifier,
        &LogHook,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements/{replacement_id}/cancel` endpoint.
async fn handle_cancel_replacement(
    AxumState(app_state): AxumState<AppState>,
    Path(replacement_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CancelReplacementResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelReplacementResponse = cancel_replacement(
        &mut persistence,
        replacement_id,
        &actor,
        &LogNotifier,
        &LogHook,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/applications/{application_id}/reject` endpoint.
async fn handle_reject_application(
    AxumState(app_state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<RejectApplicationResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RejectApplicationResponse = reject_application(
        &mut persistence,
        application_id,
        &actor,
        &LogNotifier,
        &LogHook,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/replacements/complete_elapsed` endpoint.
async fn handle_complete_elapsed(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CompleteElapsedApiRequest>,
) -> Result<Json<CompleteElapsedResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        today = %req.today,
        "Handling complete_elapsed request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteElapsedResponse =
        complete_elapsed_replacements(&mut persistence, req.today, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/exchanges` endpoint.
async fn handle_request_exchange(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RequestExchangeApiRequest>,
) -> Result<Json<RequestExchangeResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        requester_id = req.requester_id,
        target_id = req.target_id,
        "Handling request_exchange request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;
    let request: RequestExchangeRequest = RequestExchangeRequest {
        requester_id: req.requester_id,
        target_id: req.target_id,
        requester_leg: req.requester_leg,
        target_leg: req.target_leg,
        reason: req.reason,
        force: req.force,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RequestExchangeResponse =
        request_exchange(&mut persistence, request, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/exchanges` endpoint.
async fn handle_list_exchanges(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListExchangesQuery>,
) -> Result<Json<Vec<ExchangeInfo>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let exchanges: Vec<ExchangeInfo> =
        list_exchanges_for_user(&mut persistence, query.user_id, &actor)?;
    drop(persistence);

    Ok(Json(exchanges))
}

/// Handler for GET `/exchanges/{exchange_id}` endpoint.
async fn handle_get_exchange(
    AxumState(app_state): AxumState<AppState>,
    Path(exchange_id): Path<i64>,
) -> Result<Json<ExchangeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: ExchangeInfo = get_exchange(&mut persistence, exchange_id)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for POST `/exchanges/{exchange_id}/approve` endpoint.
async fn handle_approve_exchange(
    AxumState(app_state): AxumState<AppState>,
    Path(exchange_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<ApproveExchangeResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        exchange_id = exchange_id,
        "Handling approve_exchange request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ApproveExchangeResponse =
        approve_exchange(&mut persistence, exchange_id, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/exchanges/{exchange_id}/reject` endpoint.
async fn handle_reject_exchange(
    AxumState(app_state): AxumState<AppState>,
    Path(exchange_id): Path<i64>,
    Json(req): Json<RejectExchangeApiRequest>,
) -> Result<Json<RejectExchangeResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RejectExchangeResponse = reject_exchange(
        &mut persistence,
        exchange_id,
        req.reason.as_deref(),
        &actor,
        &LogNotifier,
        &LogHook,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/exchanges/{exchange_id}/cancel` endpoint.
async fn handle_cancel_exchange(
    AxumState(app_state): AxumState<AppState>,
    Path(exchange_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<CancelExchangeResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelExchangeResponse =
        cancel_exchange(&mut persistence, exchange_id, &actor, &LogNotifier, &LogHook)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/cycle_config", post(handle_set_cycle_config))
        .route("/cycle_config", get(handle_get_cycle_config))
        .route("/cycle_day", get(handle_get_cycle_day))
        .route("/guard_check", post(handle_guard_check))
        .route("/replacements", post(handle_create_replacement))
        .route("/replacements", get(handle_list_replacements))
        .route(
            "/replacements/complete_elapsed",
            post(handle_complete_elapsed),
        )
        .route("/replacements/{replacement_id}", get(handle_get_replacement))
        .route("/replacements/{replacement_id}/apply", post(handle_apply))
        .route(
            "/replacements/{replacement_id}/approve",
            post(handle_approve_replacement),
        )
        .route(
            "/replacements/{replacement_id}/unassign",
            post(handle_unassign),
        )
        .route(
            "/replacements/{replacement_id}/cancel",
            post(handle_cancel_replacement),
        )
        .route(
            "/applications/{application_id}/reject",
            post(handle_reject_application),
        )
        .route("/exchanges", post(handle_request_exchange))
        .route("/exchanges", get(handle_list_exchanges))
        .route("/exchanges/{exchange_id}", get(handle_get_exchange))
        .route(
            "/exchanges/{exchange_id}/approve",
            post(handle_approve_exchange),
        )
        .route(
            "/exchanges/{exchange_id}/reject",
            post(handle_reject_exchange),
        )
        .route(
            "/exchanges/{exchange_id}/cancel",
            post(handle_cancel_exchange),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FireShift Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
