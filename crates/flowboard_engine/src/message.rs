use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::RecordId;
use crate::timestamp::iso_millis;

pub const DEFAULT_CONTACT_COMPANY: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
}

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub status: ContactStatus,
}

impl ContactMessage {
    pub fn new(
        id: RecordId,
        name: String,
        email: String,
        company: Option<String>,
        message: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            company: company.unwrap_or_else(|| DEFAULT_CONTACT_COMPANY.to_string()),
            message,
            timestamp,
            status: ContactStatus::New,
        }
    }
}
