/* 📖 # Why is the CLI minimal?

The binary takes no arguments. Everything it needs comes from `flowboard.toml` in the
working directory and the environment (`PORT`, `SMTP_*`, `NOTIFICATION_EMAIL`, ...),
which is how the service is configured in every deployment anyway.

The workflow:
1. Change to the directory holding `public/` (and optionally `flowboard.toml`)
2. Export the SMTP credentials
3. Run `flowboard`

Exit codes:
- 0: never in normal operation; the server runs until the process is stopped
- 1: startup failed (bad configuration, invalid sender address, port in use)
*/

use std::env;
use std::process;
use std::thread;

use flowboard_base::pal::http::HttpServerConfig;
use flowboard_base::tracing::init_tracing;
use flowboard_base::{FlowboardResult, MailerHandle, PalHandle, RealPal, SmtpMailer};
use flowboard_engine::{ApiService, InMemoryStore, StaticAssetService, StoreHandle, load_config};
use tracing::{error, info};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run() {
        error!(error = ?e, "startup failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> FlowboardResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| flowboard_base::err!("Failed to get current directory: {}", e))?;
    let pal = PalHandle::new(RealPal::new(current_dir));

    let config = load_config(&*pal)?;
    let mailer = MailerHandle::new(SmtpMailer::new(config.smtp.clone())?);

    let service = ApiService::new(
        StoreHandle::new(InMemoryStore::new()),
        StoreHandle::new(InMemoryStore::new()),
        mailer,
        StaticAssetService::new(pal.clone(), config.static_dir.as_str()),
    )
    .with_notification_email(config.notification_email.clone());

    let server_config = HttpServerConfig::new(config.host.as_str()).with_port(config.port);
    let server = pal.start_http_server(Box::new(service), server_config)?;

    info!("Server running on port {}", server.port());
    info!(
        "API endpoints available at http://localhost:{}/api/",
        server.port()
    );

    // The accept loop runs on its own thread for as long as `server` is alive
    loop {
        thread::park();
    }
}
