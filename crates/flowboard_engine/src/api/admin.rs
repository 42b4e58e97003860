use serde::Serialize;
use tracing::instrument;

use flowboard_base::pal::http::{HttpResponse, HttpStatusCode};

use crate::lead::LeadRecord;

use super::error::{ApiError, INTERNAL_ERROR, OrDispatch};
use super::service::{ApiService, json_response};

/// Number of leads listed in `recentLeads`.
pub const RECENT_LEADS_LIMIT: usize = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminLeadsResponse {
    total_leads: usize,
    trial_users: usize,
    demo_requests: usize,
    recent_leads: Vec<LeadRecord>,
}

impl ApiService {
    // TODO: require an admin credential once operator accounts exist
    #[instrument(skip(self))]
    pub(super) fn handle_admin_leads(&self) -> Result<HttpResponse, ApiError> {
        let response = AdminLeadsResponse {
            total_leads: self.leads.len().or_dispatch(INTERNAL_ERROR)?,
            trial_users: self
                .leads
                .count_matching(LeadRecord::is_trial)
                .or_dispatch(INTERNAL_ERROR)?,
            demo_requests: self
                .leads
                .count_matching(LeadRecord::is_pending)
                .or_dispatch(INTERNAL_ERROR)?,
            recent_leads: self
                .leads
                .tail(RECENT_LEADS_LIMIT)
                .or_dispatch(INTERNAL_ERROR)?,
        };
        json_response(HttpStatusCode::Ok, &response).or_dispatch(INTERNAL_ERROR)
    }
}
