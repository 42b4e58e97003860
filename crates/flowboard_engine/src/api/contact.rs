use serde::Deserialize;
use tracing::{info, instrument};

use flowboard_base::pal::http::{HttpRequest, HttpResponse, HttpStatusCode};

use crate::message::ContactMessage;
use crate::notifications;

use super::error::{ApiError, OrDispatch};
use super::forms::{parse_form, present};
use super::service::{ApiService, SuccessResponse, json_response};

const MISSING_FIELDS: &str = "Missing required fields";
const SEND_FAILED: &str = "Failed to send message";

#[derive(Debug, Default, Deserialize)]
struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
    message: Option<String>,
}

/* 📖 # What happens when one of the two contact emails fails?

The message is stored first and stays stored whatever happens to the emails. A failed
append answers the same 500 as a failed email, and no email is attempted. The
operator notification goes out before the submitter's confirmation; if it fails, the
confirmation is not attempted and the client gets a 500. A failure of the confirmation
alone also answers 500, even though the operator was already notified.
*/

impl ApiService {
    #[instrument(skip(self, request))]
    pub(super) fn handle_contact(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let form: ContactForm = parse_form(request)?;
        let (Some(name), Some(email), Some(message)) = (
            present(form.name),
            present(form.email),
            present(form.message),
        ) else {
            return Err(ApiError::Validation(MISSING_FIELDS));
        };

        let now = self.now();
        let contact = ContactMessage::new(
            self.next_id(now),
            name,
            email,
            present(form.company),
            message,
            now,
        );
        self.messages
            .append(contact.clone())
            .or_dispatch(SEND_FAILED)?;
        info!(id = %contact.id, "contact message stored");

        let operator = self
            .notification_email
            .as_deref()
            .unwrap_or(&contact.email);
        self.dispatch(
            &notifications::contact_notification(&contact, operator),
            SEND_FAILED,
        )?;
        self.dispatch(&notifications::contact_confirmation(&contact), SEND_FAILED)?;

        json_response(
            HttpStatusCode::Ok,
            &SuccessResponse::new("Message sent successfully"),
        )
        .or_dispatch(SEND_FAILED)
    }
}
