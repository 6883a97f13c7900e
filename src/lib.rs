use std::{error::Error, str::FromStr, time::Duration};

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    serve::Serve,
    Json, Router,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool,
        SqlitePoolOptions,
    },
    Error as SqlxError,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Level;

use domain::MappingAPIError;
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    health_check,
    mappings::{
        bulk_create_mappings, create_mapping, delete_mapping, export_csv,
        export_json, get_lead_performance, get_manager_overview,
        get_members_by_project, get_project_distribution,
        get_projects_by_member, get_statistics, list_mappings,
        list_mappings_simple, update_mapping,
    },
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

/// Failure envelope shared by every endpoint: `success` is always false,
/// `code` is the machine-readable discriminator.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub code: String,
}

impl IntoResponse for MappingAPIError {
    fn into_response(self) -> Response {
        let (status, error, message, code) = match &self {
            MappingAPIError::DuplicateMapping => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    "This user is already assigned to this project"
                        .to_owned(),
                    "This user is already assigned to this project"
                        .to_owned(),
                    "DUPLICATE_MAPPING",
                )
            }
            MappingAPIError::DuplicateEntry => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    "Duplicate entry".to_owned(),
                    "This user is already assigned to this project"
                        .to_owned(),
                    "DUPLICATE_ENTRY",
                )
            }
            MappingAPIError::InvalidReference => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid reference".to_owned(),
                    "Referenced record does not exist".to_owned(),
                    "INVALID_REFERENCE",
                )
            }
            MappingAPIError::MissingField => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Missing required field".to_owned(),
                    "A required field was empty or absent".to_owned(),
                    "MISSING_FIELD",
                )
            }
            MappingAPIError::NotFound => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::NOT_FOUND,
                    "Mapping not found".to_owned(),
                    "Mapping not found".to_owned(),
                    "NOT_FOUND",
                )
            }
            MappingAPIError::TableNotFound => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_owned(),
                    "Database table not found".to_owned(),
                    "TABLE_NOT_FOUND",
                )
            }
            MappingAPIError::ConnectionTimeout => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database error".to_owned(),
                    "Timed out acquiring a database connection".to_owned(),
                    "CONNECTION_TIMEOUT",
                )
            }
            MappingAPIError::ValidationError(validation_error) => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_owned(),
                    validation_error.as_ref().to_owned(),
                    "VALIDATION_ERROR",
                )
            }
            MappingAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                    "Unexpected error".to_owned(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error,
            message,
            code: code.to_owned(),
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers(Any)
            .allow_origin(Any);

        let mappings = Router::new()
            .route("/", get(list_mappings).post(create_mapping))
            .route("/simple", get(list_mappings_simple))
            .route("/stats", get(get_statistics))
            .route("/analytics/projects", get(get_project_distribution))
            .route("/analytics/leads", get(get_lead_performance))
            .route("/analytics/managers", get(get_manager_overview))
            .route("/project/:project_name", get(get_members_by_project))
            .route("/member/:team_member_id", get(get_projects_by_member))
            .route("/bulk", post(bulk_create_mappings))
            .route("/export/csv", get(export_csv))
            .route("/export/json", get(export_json))
            .route("/:id", put(update_mapping).delete(delete_mapping));

        let router = Router::new()
            .nest("/mappings", mappings)
            .route("/health", get(health_check))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Process-wide connection pool. Bounded concurrency with acquisition and
/// idle timeouts; requests that cannot acquire a connection in time fail
/// rather than queue indefinitely.
pub async fn get_sqlite_pool(
    url: &Secret<String>,
) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url.expose_secret())?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}
