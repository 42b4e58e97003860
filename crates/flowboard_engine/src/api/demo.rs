use serde::Deserialize;
use tracing::{info, instrument};

use flowboard_base::pal::http::{HttpRequest, HttpResponse, HttpStatusCode};

use crate::lead::{DemoLead, LeadRecord};
use crate::notifications;

use super::error::{ApiError, OrDispatch};
use super::forms::{parse_form, present};
use super::service::{ApiService, SuccessResponse, json_response};

const MISSING_FIELDS: &str = "Required fields missing";
const REQUEST_FAILED: &str = "Failed to submit demo request";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoRequestForm {
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
    preferred_date: Option<String>,
    timezone: Option<String>,
}

impl ApiService {
    #[instrument(skip(self, request))]
    pub(super) fn handle_demo_request(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let form: DemoRequestForm = parse_form(request)?;
        let (Some(name), Some(email), Some(preferred_date)) = (
            present(form.name),
            present(form.email),
            present(form.preferred_date),
        ) else {
            return Err(ApiError::Validation(MISSING_FIELDS));
        };

        let now = self.now();
        let demo = DemoLead::new(
            self.next_id(now),
            name,
            email,
            present(form.company),
            preferred_date,
            present(form.timezone),
            now,
        );
        self.leads
            .append(LeadRecord::from(demo.clone()))
            .or_dispatch(REQUEST_FAILED)?;
        info!(id = %demo.id, preferred_date = %demo.preferred_date, "demo lead stored");

        self.dispatch(&notifications::demo_confirmation(&demo), REQUEST_FAILED)?;

        json_response(
            HttpStatusCode::Ok,
            &SuccessResponse::new("Demo request submitted successfully"),
        )
        .or_dispatch(REQUEST_FAILED)
    }
}
