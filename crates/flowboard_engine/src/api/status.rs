use serde::Serialize;

use flowboard_base::pal::http::{HttpResponse, HttpStatusCode};

use crate::timestamp::to_iso_millis;

use super::error::{ApiError, INTERNAL_ERROR, OrDispatch};
use super::service::{ApiService, json_response};

/// Version reported by the health endpoint.
pub const SERVICE_VERSION: &str = "1.0.0";

/// Fixed marketing counters shown on the landing page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    total_users: u32,
    projects_completed: u32,
    teams_using: u32,
    satisfaction_rate: f64,
}

const STATS: StatsResponse = StatsResponse {
    total_users: 12500,
    projects_completed: 38500,
    teams_using: 2400,
    satisfaction_rate: 98.5,
};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
}

impl ApiService {
    pub(super) fn handle_stats(&self) -> Result<HttpResponse, ApiError> {
        json_response(HttpStatusCode::Ok, &STATS).or_dispatch(INTERNAL_ERROR)
    }

    pub(super) fn handle_health(&self) -> Result<HttpResponse, ApiError> {
        let response = HealthResponse {
            status: "healthy",
            timestamp: to_iso_millis(&self.now()),
            version: SERVICE_VERSION,
        };
        json_response(HttpStatusCode::Ok, &response).or_dispatch(INTERNAL_ERROR)
    }
}
