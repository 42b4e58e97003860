/* 📖 # Why a single unified API service?

The ApiService is the one HttpService registered with the PAL. It routes by method
and path to a handler per endpoint, and everything it does not recognize goes to the
static asset service:

- `GET  /api/stats`         -> marketing counters
- `POST /api/contact`       -> store message, notify operator, confirm to submitter
- `POST /api/signup/trial`  -> store trial lead, send welcome mail
- `POST /api/demo/request`  -> store demo lead, send confirmation
- `GET  /api/admin/leads`   -> lead counts and the most recent leads
- `GET  /api/health`        -> liveness
- `OPTIONS *`               -> CORS preflight
- other `GET`/`HEAD`        -> static file or `index.html`
- anything else             -> 404 `Cannot {METHOD} {path}`

All handlers share the stores, the mailer and the clock through cheap handles, so the
service itself is Clone and can be handed to the server as-is.
*/

/* 📖 # Why use serde for JSON serialization?

Every response body is a struct deriving Serialize, turned into JSON by one helper.
serde_json takes care of escaping and the compiler keeps field names and types in
line with the structs; hand-built JSON strings would get neither.
*/

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use flowboard_base::pal::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode,
};
use flowboard_base::{FlowboardError, FlowboardResult, MailerHandle, OutgoingMail};

use crate::assets::StaticAssetService;
use crate::clock::{Clock, SystemClock};
use crate::id::{RecordId, RecordIdGenerator};
use crate::store::{LeadStore, MessageStore};

use super::error::{ApiError, INTERNAL_ERROR, OrDispatch};

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";
const DEFAULT_ALLOW_HEADERS: &str = "Content-Type";

/// Body of every successful form submission.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SuccessResponse {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trial_end: Option<String>,
}

impl SuccessResponse {
    pub(super) fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            trial_end: None,
        }
    }

    pub(super) fn with_trial_end(mut self, trial_end: String) -> Self {
        self.trial_end = Some(trial_end);
        self
    }
}

/// Serialize data to JSON and wrap it in a response with the given status.
pub(crate) fn json_response<T: Serialize>(
    status: HttpStatusCode,
    data: &T,
) -> FlowboardResult<HttpResponse> {
    serde_json::to_string(data)
        .map(|json| HttpResponse::json(status, json))
        .map_err(|e| Box::new(FlowboardError::json(e).context("Failed to serialize response")))
}

/// HTTP service providing every FlowBoard endpoint plus the static site.
#[derive(Clone)]
pub struct ApiService {
    pub(super) leads: LeadStore,
    pub(super) messages: MessageStore,
    mailer: MailerHandle,
    assets: StaticAssetService,
    pub(super) notification_email: Option<String>,
    clock: Arc<dyn Clock>,
    ids: Arc<RecordIdGenerator>,
}

impl ApiService {
    /// Create a service on the wall clock with no operator address configured.
    ///
    /// # Examples
    /// ```
    /// use flowboard_base::{MailerHandle, MockMailer, MockPal, PalHandle};
    /// use flowboard_engine::{ApiService, InMemoryStore, StaticAssetService, StoreHandle};
    ///
    /// let service = ApiService::new(
    ///     StoreHandle::new(InMemoryStore::new()),
    ///     StoreHandle::new(InMemoryStore::new()),
    ///     MailerHandle::new(MockMailer::new()),
    ///     StaticAssetService::new(PalHandle::new(MockPal::new()), "public"),
    /// )
    /// .with_notification_email(Some("sales@example.com".to_string()));
    /// ```
    pub fn new(
        leads: LeadStore,
        messages: MessageStore,
        mailer: MailerHandle,
        assets: StaticAssetService,
    ) -> Self {
        Self {
            leads,
            messages,
            mailer,
            assets,
            notification_email: None,
            clock: Arc::new(SystemClock),
            ids: Arc::new(RecordIdGenerator::new()),
        }
    }

    /// Address receiving contact notifications. `None` sends them to the submitter.
    pub fn with_notification_email(mut self, email: Option<String>) -> Self {
        self.notification_email = email;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(super) fn next_id(&self, now: DateTime<Utc>) -> RecordId {
        self.ids.next_id(now)
    }

    /// Send one email, mapping a transport failure to the endpoint's public message.
    pub(super) fn dispatch(
        &self,
        mail: &OutgoingMail,
        failure_message: &'static str,
    ) -> Result<(), ApiError> {
        self.mailer.send(mail).or_dispatch(failure_message)?;
        info!(to = %mail.to, subject = %mail.subject, "mail sent");
        Ok(())
    }

    fn route(&self, method: HttpMethod, path: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let route = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match (method, route) {
            (HttpMethod::Get, "/api/stats") => self.handle_stats(),
            (HttpMethod::Post, "/api/contact") => self.handle_contact(request),
            (HttpMethod::Post, "/api/signup/trial") => self.handle_trial_signup(request),
            (HttpMethod::Post, "/api/demo/request") => self.handle_demo_request(request),
            (HttpMethod::Get, "/api/admin/leads") => self.handle_admin_leads(),
            (HttpMethod::Get, "/api/health") => self.handle_health(),
            (HttpMethod::Get | HttpMethod::Head, _) => {
                self.assets.serve(path).or_dispatch(INTERNAL_ERROR)
            }
            _ => Ok(HttpResponse::text(
                HttpStatusCode::NotFound,
                format!("Cannot {} {}", method, path),
            )),
        }
    }
}

/// Answer a CORS preflight, allowing whatever headers the browser asks for.
fn preflight(request: &HttpRequest) -> HttpResponse {
    let allow_headers = request
        .headers()
        .get("Access-Control-Request-Headers")
        .cloned()
        .unwrap_or_else(|| DEFAULT_ALLOW_HEADERS.to_string());
    HttpResponse::no_content()
        .with_header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .with_header("Access-Control-Allow-Headers", allow_headers)
        .with_header("Vary", "Access-Control-Request-Headers")
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("notification_email", &self.notification_email)
            .field("mailer", &self.mailer)
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}

impl HttpService for ApiService {
    fn handle_request(&self, request: HttpRequest) -> FlowboardResult<HttpResponse> {
        let method = request.method();
        let path = request.path().to_string();
        debug!(%method, path = %path, "handling request");

        let response = if method == HttpMethod::Options {
            preflight(&request)
        } else {
            self.route(method, &path, &request)
                .unwrap_or_else(ApiError::into_response)
        };

        debug!(%method, path = %path, status = response.status().as_u16(), "request complete");
        Ok(response.with_header("Access-Control-Allow-Origin", ALLOW_ORIGIN))
    }
}
