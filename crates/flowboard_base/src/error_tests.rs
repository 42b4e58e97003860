/* 📖 # Why use a separate file for these error tests?

Some test cases verify span traces which contain line numbers.

To prevent these line numbers from changing when modifying the main error module, we use a separate file for the tests.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{FlowboardError, FlowboardResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tracing::span;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    // 📖 # Why set up a subscriber in the test?
    // SpanTrace::capture() requires an active tracing subscriber with an ErrorLayer.
    // `try_init()` tolerates several tests racing to install it.
    fn setup_tracing_subscriber() {
        let _ = tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .try_init();
    }

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("public/index.html");
        let error = FlowboardError::new(ErrorKind::FileError {
            path: path.clone(),
            source: io_err,
        });

        match error.kind() {
            ErrorKind::FileError { path: p, .. } => assert_eq!(p, &path),
            _ => panic!("Expected FileError variant"),
        }
        assert!(error.source().is_some());
        assert_eq!(error.root_cause().to_string(), "file not found");
    }

    #[test]
    fn test_config_error_display() {
        let error = FlowboardError::config("PORT", "expected a port number, got 'abc'");
        assert_eq!(
            error.to_string(),
            "Invalid configuration for 'PORT': expected a port number, got 'abc'"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_mail_error_display() {
        let error = FlowboardError::mail("ana@example.com", "connection refused");
        assert_eq!(
            error.to_string(),
            "Failed to send mail to ana@example.com: connection refused"
        );
    }

    #[test]
    fn test_json_error_keeps_source() {
        let source = io::Error::new(io::ErrorKind::InvalidData, "expected value at line 1");
        let error = FlowboardError::json(source);
        assert_eq!(error.to_string(), "JSON error: expected value at line 1");
        assert_eq!(
            error.root_cause().to_string(),
            "expected value at line 1"
        );
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = FlowboardError::message("root error")
            .context("first")
            .context("second");
        assert_eq!(error.to_string(), "first: second: root error");
        assert_eq!(error.get_context(), ["first", "second"]);
    }

    #[test]
    fn test_with_context_is_lazy_on_success() {
        let result: FlowboardResult<i32> = Ok(42);
        let value = result
            .with_context(|| panic!("context must not be built for Ok"))
            .unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: FlowboardResult<i32> = Err(Box::new(FlowboardError::message("root")));
        let err = result
            .context("step 1")
            .with_context(|| "step 2".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: root");
    }

    #[test]
    fn test_err_macro_formats_message() {
        let error: Box<FlowboardError> = crate::err!("no route for {} {}", "PUT", "/api/x");
        assert_eq!(error.to_string(), "no route for PUT /api/x");
    }

    #[test]
    fn test_bail_macro_returns_early() {
        fn check(value: u16) -> FlowboardResult<u16> {
            if value == 0 {
                crate::bail!("port must not be {}", value);
            }
            Ok(value)
        }
        assert_eq!(check(3000).unwrap(), 3000);
        assert_eq!(check(0).unwrap_err().to_string(), "port must not be 0");
    }

    #[test]
    fn test_cause_is_exposed_as_source() {
        let inner = FlowboardError::mail("ops@example.com", "timeout");
        let outer = FlowboardError::message("notification failed").caused_by(inner);

        assert_eq!(
            outer.source().unwrap().to_string(),
            "Failed to send mail to ops@example.com: timeout"
        );
        assert!(outer.cause().is_some());
    }

    #[test]
    fn test_debug_tree_without_span() {
        let error = FlowboardError::message("something went wrong")
            .context("while handling contact form")
            .context("for ana@example.com");

        expect![[r#"
            something went wrong
            ├─ while handling contact form
            └─ for ana@example.com

        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_debug_nested_causes() {
        let smtp = FlowboardError::mail("ana@example.com", "530 authentication required")
            .context("sending confirmation");
        let handler = FlowboardError::message("contact dispatch failed")
            .context("POST /api/contact")
            .caused_by(smtp);

        expect![[r#"
            contact dispatch failed
            ├─ POST /api/contact
            └─ cause: Failed to send mail to ana@example.com: 530 authentication required
               └─ sending confirmation

        "#]]
        .assert_debug_eq(&handler);
    }

    #[test]
    fn test_debug_includes_span_trace_when_captured() {
        setup_tracing_subscriber();

        let request_span = span!(tracing::Level::INFO, "handle_trial_signup", lead_id = 7);
        let _guard = request_span.enter();

        let error = FlowboardError::message("mail transport unavailable");
        let debug = format!("{:?}", error);

        assert!(debug.starts_with("mail transport unavailable\n"));
        assert!(debug.contains("Trace:"));
        assert!(debug.contains("handle_trial_signup"));
        assert!(debug.contains("lead_id=7"));
    }
}
