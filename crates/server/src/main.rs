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

mod credentials;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use agenda_api::{
    AgendaConfig, ApiError, AssignmentListResponse, AssignmentView, CalendarResponse,
    CatalogResponse, ConfigError, CredentialTable, DailyLoadResponse, DeleteAssignmentResponse,
    SchedulingService, StoreConfig, SubmitAssignmentResponse,
};
use agenda_domain::{AssignmentDraft, AssignmentId, CalendarEvent, DailyLoad, WeekRange, parse_date};
use agenda_persistence::{Persistence, SchemaVariant};
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::credentials::AuthenticatedUser;

/// Agenda Server - HTTP server for the school assignment scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file. Without one, built-in defaults
    /// are used and no user can sign in.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store assignments in this CSV file instead of the configured store.
    #[arg(long, conflicts_with = "sqlite")]
    csv: Option<PathBuf>,

    /// Column layout used when writing `--csv` (duration or timed).
    #[arg(long, default_value = "duration")]
    csv_variant: SchemaVariant,

    /// Store assignments in this `SQLite` file instead of the configured store.
    #[arg(long)]
    sqlite: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

impl Args {
    /// Command-line store flags win over the configuration file.
    fn store(&self, config: &AgendaConfig) -> StoreConfig {
        match (&self.csv, &self.sqlite) {
            (Some(path), _) => StoreConfig::Csv {
                path: path.clone(),
                variant: self.csv_variant,
            },
            (None, Some(path)) => StoreConfig::Sqlite {
                path: Some(path.clone()),
            },
            (None, None) => config.store.clone(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The scheduling service. It serializes conflicting submissions itself.
    service: Arc<SchedulingService<Persistence>>,
    /// Users allowed to sign in.
    credentials: Arc<CredentialTable>,
}

impl AppState {
    /// Builds the state from configuration and an already chosen store.
    fn from_config(config: &AgendaConfig, store: &StoreConfig) -> Result<Self, ConfigError> {
        let credentials: CredentialTable = config.credential_table()?;
        if credentials.is_empty() {
            warn!("No credentials configured; every protected request will be rejected");
        }

        let service: SchedulingService<Persistence> = SchedulingService::new(
            store.open()?,
            config.scheduling_rules()?,
            config.calendar_projector()?,
        );

        Ok(Self {
            service: Arc::new(service),
            credentials: Arc::new(credentials),
        })
    }
}

/// Query parameters naming a course.
#[derive(Debug, Deserialize)]
struct CourseQuery {
    /// The course name.
    course: String,
}

/// Query parameters for the calendar endpoint.
#[derive(Debug, Deserialize)]
struct CalendarQuery {
    /// The course name.
    course: String,
    /// Any day of the week to restrict to (`YYYY-MM-DD`).
    week_of: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Machine-readable error kind.
    kind: String,
    /// Error message.
    message: String,
    /// The field that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    /// Assignments already on the day, for quota rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl ErrorResponse {
    fn new(kind: &str, message: String) -> Self {
        Self {
            error: true,
            kind: kind.to_string(),
            message,
            field: None,
            count: None,
        }
    }

    fn into_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error body.
    body: ErrorResponse,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.body.into_status(self.status)
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                body: ErrorResponse::new("authentication_failed", message),
            },
            ApiError::ValidationFailed { field, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorResponse {
                    field: Some(field),
                    ..ErrorResponse::new("validation_failed", message)
                },
            },
            ApiError::QuotaExceeded { count, .. } => Self {
                status: StatusCode::CONFLICT,
                body: ErrorResponse {
                    count: Some(count),
                    ..ErrorResponse::new("quota_exceeded", message)
                },
            },
            ApiError::Forbidden { .. } => Self {
                status: StatusCode::FORBIDDEN,
                body: ErrorResponse::new("forbidden", message),
            },
            ApiError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorResponse::new("not_found", message),
            },
            ApiError::StoreUnavailable { .. } => {
                error!(error = %message, "Record store unavailable");
                Self {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: ErrorResponse::new("store_unavailable", message),
                }
            }
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new("internal", message),
                }
            }
        }
    }
}

/// Runs a service call on the blocking pool; stores do synchronous I/O.
async fn run_blocking<T, F>(call: F) -> Result<T, HttpError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(HttpError::from),
        Err(e) => Err(HttpError::from(ApiError::Internal {
            message: format!("Service task failed: {e}"),
        })),
    }
}

/// Handler for GET `/catalog` endpoint.
///
/// Returns the submission form options. No credentials needed.
async fn handle_catalog(AxumState(app_state): AxumState<AppState>) -> Json<CatalogResponse> {
    Json(app_state.service.catalog())
}

/// Handler for POST `/assignments` endpoint.
async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(draft): Json<AssignmentDraft>,
) -> Result<(StatusCode, Json<SubmitAssignmentResponse>), HttpError> {
    info!(
        login = actor.login(),
        course = %draft.course,
        due_date = %draft.due_date,
        "Handling submit request"
    );

    let service = Arc::clone(&app_state.service);
    let id: AssignmentId = run_blocking(move || service.submit(&draft, &actor)).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitAssignmentResponse {
            assignment_id: id.value(),
            message: format!("Assignment {id} scheduled"),
        }),
    ))
}

/// Handler for GET `/assignments` endpoint.
///
/// Lists one course's assignments, descriptions redacted for the caller.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Query(query): Query<CourseQuery>,
) -> Result<Json<AssignmentListResponse>, HttpError> {
    info!(course = %query.course, "Handling list_assignments request");

    let service = Arc::clone(&app_state.service);
    let course: String = query.course.clone();
    let assignments: Vec<AssignmentView> =
        run_blocking(move || service.list_assignments(&course, &actor)).await?;

    Ok(Json(AssignmentListResponse {
        course: query.course,
        assignments,
    }))
}

/// Handler for DELETE `/assignments/{assignment_id}` endpoint.
async fn handle_delete(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(assignment_id): Path<i64>,
) -> Result<Json<DeleteAssignmentResponse>, HttpError> {
    info!(login = actor.login(), assignment_id, "Handling delete request");

    let service = Arc::clone(&app_state.service);
    let id: AssignmentId = AssignmentId::new(assignment_id);
    run_blocking(move || service.delete(id, &actor)).await?;

    Ok(Json(DeleteAssignmentResponse {
        assignment_id,
        message: format!("Assignment {assignment_id} deleted"),
    }))
}

/// Handler for GET `/calendar` endpoint.
///
/// Returns every event of the course, or only those of the week containing
/// `week_of` when given.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, HttpError> {
    info!(course = %query.course, week_of = ?query.week_of, "Handling calendar request");

    let week_of = match query.week_of.as_deref() {
        Some(raw) => Some(parse_date(raw).map_err(|e| {
            HttpError::from(ApiError::ValidationFailed {
                field: String::from("week_of"),
                message: e.to_string(),
            })
        })?),
        None => None,
    };

    let service = Arc::clone(&app_state.service);
    let course: String = query.course.clone();
    let (week, events): (Option<WeekRange>, Vec<CalendarEvent>) = run_blocking(move || {
        match week_of {
            Some(day) => service
                .query_calendar_week(&course, day, &actor)
                .map(|(week, events)| (Some(week), events)),
            None => service.query_calendar(&course, &actor).map(|events| (None, events)),
        }
    })
    .await?;

    Ok(Json(CalendarResponse {
        course: query.course,
        week: week.map(Into::into),
        events,
    }))
}

/// Handler for GET `/load` endpoint.
async fn handle_daily_load(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedUser(_actor): AuthenticatedUser,
    Query(query): Query<CourseQuery>,
) -> Result<Json<DailyLoadResponse>, HttpError> {
    info!(course = %query.course, "Handling daily_load request");

    let service = Arc::clone(&app_state.service);
    let course: String = query.course.clone();
    let days: Vec<DailyLoad> = run_blocking(move || service.daily_load(&course)).await?;

    Ok(Json(DailyLoadResponse {
        course: query.course,
        days: days.into_iter().map(Into::into).collect(),
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/catalog", get(handle_catalog))
        .route(
            "/assignments",
            get(handle_list_assignments).post(handle_submit),
        )
        .route("/assignments/{assignment_id}", delete(handle_delete))
        .route("/calendar", get(handle_calendar))
        .route("/load", get(handle_daily_load))
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

    info!("Initializing Agenda Server");

    let config: AgendaConfig = match &args.config {
        Some(path) => AgendaConfig::load(path)?,
        None => {
            info!("No configuration file given; using defaults");
            AgendaConfig::default()
        }
    };

    let store: StoreConfig = args.store(&config);
    let app_state: AppState = AppState::from_config(&config, &store)?;

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
