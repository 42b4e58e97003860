/* 📖 # Where does configuration come from?

Settings are layered: built-in defaults, then an optional `flowboard.toml` in the
working directory, then environment variables, which win. The file is read through the
PAL and the environment through a lookup function, so tests cover every layer without
touching the real filesystem or mutating the process environment.

Empty environment variables count as unset, matching how `.env` files are usually
written (`SMTP_PASS=`).
*/

use serde::Deserialize;
use tracing::{debug, info, instrument};

use flowboard_base::{FilePath, FlowboardError, FlowboardResult, Pal, ResultExt, SmtpSettings};

pub const CONFIG_FILE_NAME: &str = "flowboard.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SENDER: &str = "no-reply@flowboard.example.com";

/// Resolved runtime configuration of the FlowBoard server.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory, relative to the working directory, holding the site's static files.
    pub static_dir: String,
    /// Operator address for contact notifications. Unset means the submitter gets them.
    pub notification_email: Option<String>,
    pub smtp: SmtpSettings,
}

/// Layout of `flowboard.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
    notification_email: Option<String>,
    smtp: FileSmtpConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSmtpConfig {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    from: Option<String>,
}

/// Load configuration from `flowboard.toml` (if present) and the process environment.
pub fn load_config(pal: &dyn Pal) -> FlowboardResult<Config> {
    load_config_with_env(pal, |key| std::env::var(key).ok())
}

/// Load configuration, resolving environment variables through `env`.
#[instrument(skip(pal, env))]
pub fn load_config_with_env(
    pal: &dyn Pal,
    env: impl Fn(&str) -> Option<String>,
) -> FlowboardResult<Config> {
    let file = read_config_file(pal)?;
    let env = |key: &str| env(key).filter(|value| !value.is_empty());

    let smtp_user = env("SMTP_USER").or(file.smtp.user);
    let from = env("MAIL_FROM")
        .or(file.smtp.from)
        .or_else(|| smtp_user.clone())
        .unwrap_or_else(|| DEFAULT_SENDER.to_string());

    let config = Config {
        host: env("HOST")
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: parse_port("PORT", env("PORT"))?
            .or(file.port)
            .unwrap_or(DEFAULT_PORT),
        static_dir: env("STATIC_DIR")
            .or(file.static_dir)
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        notification_email: env("NOTIFICATION_EMAIL").or(file.notification_email),
        smtp: SmtpSettings {
            host: env("SMTP_HOST")
                .or(file.smtp.host)
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: parse_port("SMTP_PORT", env("SMTP_PORT"))?
                .or(file.smtp.port)
                .unwrap_or(DEFAULT_SMTP_PORT),
            username: smtp_user,
            password: env("SMTP_PASS").or(file.smtp.password),
            from,
        },
    };
    info!(host = %config.host, port = config.port, static_dir = %config.static_dir, "configuration loaded");
    Ok(config)
}

fn read_config_file(pal: &dyn Pal) -> FlowboardResult<FileConfig> {
    let path = FilePath::from(CONFIG_FILE_NAME);
    if !pal.file_exists(&path)? {
        debug!("no {} found, using defaults and environment", CONFIG_FILE_NAME);
        return Ok(FileConfig::default());
    }
    let content = pal
        .read_file_to_string(&path)
        .with_context(|| format!("Failed to read {}", CONFIG_FILE_NAME))?;
    toml::from_str(&content).map_err(|e| {
        Box::new(FlowboardError::config(
            CONFIG_FILE_NAME,
            e.message().to_string(),
        ))
    })
}

fn parse_port(key: &str, value: Option<String>) -> FlowboardResult<Option<u16>> {
    value
        .map(|value| {
            value.trim().parse::<u16>().map_err(|e| {
                Box::new(FlowboardError::config(
                    key,
                    format!("'{}' is not a valid port: {}", value, e),
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowboard_base::MockPal;
    use flowboard_base::error::ErrorKind;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = load_config_with_env(&MockPal::new(), env_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.notification_email, None);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.username, None);
        assert_eq!(config.smtp.from, "no-reply@flowboard.example.com");
    }

    #[test]
    fn test_environment() {
        let env = env_from(&[
            ("PORT", "8080"),
            ("SMTP_HOST", "mail.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USER", "bot@example.com"),
            ("SMTP_PASS", "secret"),
            ("NOTIFICATION_EMAIL", "sales@example.com"),
        ]);
        let config = load_config_with_env(&MockPal::new(), env).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.smtp.host, "mail.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.password.as_deref(), Some("secret"));
        assert_eq!(config.notification_email.as_deref(), Some("sales@example.com"));
        // The SMTP login doubles as sender address
        assert_eq!(config.smtp.from, "bot@example.com");
    }

    #[test]
    fn test_mail_from_overrides_smtp_user() {
        let env = env_from(&[
            ("SMTP_USER", "bot@example.com"),
            ("MAIL_FROM", "hello@example.com"),
        ]);
        let config = load_config_with_env(&MockPal::new(), env).unwrap();
        assert_eq!(config.smtp.from, "hello@example.com");
    }

    #[test]
    fn test_empty_variables_are_unset() {
        let env = env_from(&[("PORT", ""), ("NOTIFICATION_EMAIL", "")]);
        let config = load_config_with_env(&MockPal::new(), env).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.notification_email, None);
    }

    #[test]
    fn test_file_with_environment_override() {
        let pal = MockPal::new();
        pal.add_file(
            FilePath::from("flowboard.toml"),
            br#"
port = 4000
static_dir = "site"
notification_email = "ops@example.com"

[smtp]
host = "relay.internal"
user = "relay@example.com"
"#
            .to_vec(),
        );
        let config = load_config_with_env(&pal, env_from(&[("PORT", "5000")])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.static_dir, "site");
        assert_eq!(config.notification_email.as_deref(), Some("ops@example.com"));
        assert_eq!(config.smtp.host, "relay.internal");
        assert_eq!(config.smtp.from, "relay@example.com");
    }

    #[test]
    fn test_invalid_port() {
        let err = load_config_with_env(&MockPal::new(), env_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { key, .. } if key == "PORT"));
        assert!(err.to_string().contains("'http' is not a valid port"));
    }

    #[test]
    fn test_unknown_file_key_is_rejected() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("flowboard.toml"), b"prot = 1\n".to_vec());
        let err = load_config_with_env(&pal, env_from(&[])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Config { key, .. } if key == "flowboard.toml"));
    }
}
