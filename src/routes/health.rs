use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{domain::MappingStatistics, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: UptimeInfo,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UptimeInfo {
    pub seconds: u64,
    pub formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<MappingStatistics>,
}

#[tracing::instrument(name = "Health check route handler", skip_all)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let uptime_seconds = state.started_at.elapsed().as_secs();
    let uptime = UptimeInfo {
        seconds: uptime_seconds,
        formatted: format_uptime(uptime_seconds),
    };
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let probe_started = Instant::now();
    match state.mapping_store.ping().await {
        Ok(()) => {
            let response_time =
                format!("{}ms", probe_started.elapsed().as_millis());
            let stats = state.mapping_store.statistics().await.ok();

            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_owned(),
                    timestamp,
                    uptime,
                    database: DatabaseHealth {
                        connected: true,
                        response_time: Some(response_time),
                        stats,
                    },
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("health check failed to reach the store: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_owned(),
                    timestamp,
                    uptime,
                    database: DatabaseHealth {
                        connected: false,
                        response_time: None,
                        stats: None,
                    },
                }),
            )
                .into_response()
        }
    }
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
