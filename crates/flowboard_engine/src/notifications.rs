/* 📖 # How are emails rendered?

Each outgoing email is a plain function from a stored record to an `OutgoingMail`.
The HTML is assembled with `format!`: the bodies are short, fixed marketing copy with
a handful of interpolated fields, and submitted values are inserted as-is (no escaping
or sanitization is applied to form input).

Dates shown to people are rendered in UTC in a US-style short format, e.g. `5/15/2024`
for a trial end and `6/1/2024, 3:00:00 PM` for a demo slot. Demo dates are free text
from the form, so anything that does not parse as a date or timestamp is echoed verbatim.
*/

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use flowboard_base::OutgoingMail;

use crate::lead::{DemoLead, TrialLead};
use crate::message::ContactMessage;

pub const LOGIN_URL: &str = "https://app.flowboard.example.com/login";
pub const HELP_URL: &str = "https://help.flowboard.example.com";
pub const DEMO_CALL_URL: &str = "https://calendly.com/flowboard-demo";
pub const VIDEOS_URL: &str = "https://youtube.com/flowboard";
pub const TRIAL_URL: &str = "https://app.flowboard.example.com/trial";

/// Operator notification about a new contact form submission.
pub fn contact_notification(message: &ContactMessage, to: &str) -> OutgoingMail {
    OutgoingMail::new(
        to,
        format!("New Contact Form Submission from {}", message.name),
        format!(
            r#"<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Company:</strong> {company}</p>
<p><strong>Message:</strong></p>
<p>{message}</p>
<hr>
<p>This message was sent from the FlowBoard contact form.</p>
"#,
            name = message.name,
            email = message.email,
            company = message.company,
            message = message.message,
        ),
    )
}

/// Confirmation sent back to whoever submitted the contact form.
pub fn contact_confirmation(message: &ContactMessage) -> OutgoingMail {
    OutgoingMail::new(
        &message.email,
        "Thank you for contacting FlowBoard",
        format!(
            r#"<h2>Thank you for reaching out!</h2>
<p>Dear {name},</p>
<p>We've received your message and our team will get back to you within 24 hours.</p>
<p>Here's a copy of your message:</p>
<blockquote>{message}</blockquote>
<p>Best regards,<br>The FlowBoard Team</p>
"#,
            name = message.name,
            message = message.message,
        ),
    )
}

pub fn trial_welcome(trial: &TrialLead) -> OutgoingMail {
    OutgoingMail::new(
        &trial.email,
        "Welcome to FlowBoard - Your 14-Day Trial",
        format!(
            r#"<h2>Welcome to FlowBoard, {name}!</h2>
<p>Your 14-day free trial has been activated. Here's what you can do next:</p>
<ol>
    <li><strong>Set up your workspace:</strong> Log in and create your first project</li>
    <li><strong>Invite team members:</strong> Add your team to collaborate</li>
    <li><strong>Explore features:</strong> Try out our task management and analytics tools</li>
</ol>
<p><strong>Login URL:</strong> <a href="{login}">{login}</a></p>
<p><strong>Trial End Date:</strong> {end}</p>
<p>Need help getting started? Check out our <a href="{help}">documentation</a> or schedule a <a href="{demo}">demo call</a>.</p>
<p>Best regards,<br>The FlowBoard Team</p>
"#,
            name = trial.name,
            login = LOGIN_URL,
            end = format_short_date(&trial.end_date),
            help = HELP_URL,
            demo = DEMO_CALL_URL,
        ),
    )
}

pub fn demo_confirmation(demo: &DemoLead) -> OutgoingMail {
    OutgoingMail::new(
        &demo.email,
        "FlowBoard Demo Request Confirmation",
        format!(
            r#"<h2>Demo Request Received</h2>
<p>Hi {name},</p>
<p>We've received your request for a FlowBoard demo on {date}.</p>
<p>Our sales team will contact you within 24 hours to confirm the schedule.</p>
<p>In the meantime, you can:</p>
<ul>
    <li>Watch our <a href="{videos}">introductory videos</a></li>
    <li>Explore our <a href="{help}">feature guides</a></li>
    <li>Start a <a href="{trial}">free trial</a></li>
</ul>
<p>Best regards,<br>The FlowBoard Team</p>
"#,
            name = demo.name,
            date = format_preferred_date(&demo.preferred_date),
            videos = VIDEOS_URL,
            help = HELP_URL,
            trial = TRIAL_URL,
        ),
    )
}

/// `M/D/YYYY` in UTC.
pub fn format_short_date(instant: &DateTime<Utc>) -> String {
    instant.format("%-m/%-d/%Y").to_string()
}

/// `M/D/YYYY, h:mm:ss AM` in UTC if `raw` is a date or timestamp, otherwise `raw` itself.
pub fn format_preferred_date(raw: &str) -> String {
    parse_preferred_date(raw.trim())
        .map(|instant| instant.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_preferred_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RecordId;
    use chrono::TimeZone;
    use expect_test::expect;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn contact() -> ContactMessage {
        ContactMessage::new(
            RecordId::new(1),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            None,
            "Do you support SSO?".to_string(),
            instant(),
        )
    }

    #[test]
    fn test_short_date() {
        assert_eq!(format_short_date(&instant()), "5/1/2024");
    }

    #[test]
    fn test_preferred_date_formats() {
        assert_eq!(
            format_preferred_date("2024-06-01T15:00:00.000Z"),
            "6/1/2024, 3:00:00 PM"
        );
        assert_eq!(
            format_preferred_date("2024-06-01T15:00:00+02:00"),
            "6/1/2024, 1:00:00 PM"
        );
        assert_eq!(format_preferred_date("2024-06-01T09:05"), "6/1/2024, 9:05:00 AM");
        assert_eq!(format_preferred_date("2024-12-24"), "12/24/2024, 12:00:00 AM");
    }

    #[test]
    fn test_unparseable_preferred_date_is_verbatim() {
        assert_eq!(format_preferred_date("next Tuesday"), "next Tuesday");
    }

    #[test]
    fn test_contact_notification() {
        let mail = contact_notification(&contact(), "sales@example.com");
        assert_eq!(mail.to, "sales@example.com");
        assert_eq!(mail.subject, "New Contact Form Submission from Ana");
        expect![[r#"
            <h2>New Contact Form Submission</h2>
            <p><strong>Name:</strong> Ana</p>
            <p><strong>Email:</strong> ana@example.com</p>
            <p><strong>Company:</strong> Not specified</p>
            <p><strong>Message:</strong></p>
            <p>Do you support SSO?</p>
            <hr>
            <p>This message was sent from the FlowBoard contact form.</p>
        "#]]
        .assert_eq(&mail.html_body);
    }

    #[test]
    fn test_contact_confirmation_quotes_message() {
        let mail = contact_confirmation(&contact());
        assert_eq!(mail.to, "ana@example.com");
        assert_eq!(mail.subject, "Thank you for contacting FlowBoard");
        assert!(mail.html_body.contains("<p>Dear Ana,</p>"));
        assert!(mail
            .html_body
            .contains("<blockquote>Do you support SSO?</blockquote>"));
    }

    #[test]
    fn test_trial_welcome_shows_end_date() {
        let trial = TrialLead::new(
            RecordId::new(1),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            None,
            None,
            instant(),
        );
        let mail = trial_welcome(&trial);
        assert_eq!(mail.subject, "Welcome to FlowBoard - Your 14-Day Trial");
        assert!(mail.html_body.contains("<h2>Welcome to FlowBoard, Ana!</h2>"));
        assert!(mail
            .html_body
            .contains("<p><strong>Trial End Date:</strong> 5/15/2024</p>"));
    }

    #[test]
    fn test_demo_confirmation() {
        let demo = DemoLead::new(
            RecordId::new(2),
            "Bo".to_string(),
            "bo@example.com".to_string(),
            Some("Initech".to_string()),
            "2024-06-01T15:00:00Z".to_string(),
            None,
            instant(),
        );
        let mail = demo_confirmation(&demo);
        assert_eq!(mail.to, "bo@example.com");
        assert_eq!(mail.subject, "FlowBoard Demo Request Confirmation");
        assert!(mail
            .html_body
            .contains("a FlowBoard demo on 6/1/2024, 3:00:00 PM.</p>"));
    }
}
