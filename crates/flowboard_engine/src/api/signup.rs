use serde::Deserialize;
use tracing::{info, instrument};

use flowboard_base::pal::http::{HttpRequest, HttpResponse, HttpStatusCode};

use crate::lead::{LeadRecord, TrialLead};
use crate::notifications;
use crate::timestamp::to_iso_millis;

use super::error::{ApiError, OrDispatch};
use super::forms::{parse_form, present};
use super::service::{ApiService, SuccessResponse, json_response};

const MISSING_FIELDS: &str = "Name and email are required";
const SIGNUP_FAILED: &str = "Failed to create trial account";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrialSignupForm {
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
    team_size: Option<String>,
}

impl ApiService {
    /// The trial window is derived once from a single clock reading; the stored lead, the
    /// welcome mail and the response all show the same end date.
    #[instrument(skip(self, request))]
    pub(super) fn handle_trial_signup(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let form: TrialSignupForm = parse_form(request)?;
        let (Some(name), Some(email)) = (present(form.name), present(form.email)) else {
            return Err(ApiError::Validation(MISSING_FIELDS));
        };

        let now = self.now();
        let trial = TrialLead::new(
            self.next_id(now),
            name,
            email,
            present(form.company),
            present(form.team_size),
            now,
        );
        self.leads
            .append(LeadRecord::from(trial.clone()))
            .or_dispatch(SIGNUP_FAILED)?;
        info!(id = %trial.id, end = %trial.end_date, "trial lead stored");

        self.dispatch(&notifications::trial_welcome(&trial), SIGNUP_FAILED)?;

        json_response(
            HttpStatusCode::Ok,
            &SuccessResponse::new("Trial account created successfully")
                .with_trial_end(to_iso_millis(&trial.end_date)),
        )
        .or_dispatch(SIGNUP_FAILED)
    }
}
