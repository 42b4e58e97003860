/* 📖 # Why is LeadRecord an untagged enum?

Trial signups and demo requests share one store but carry different fields. Modelling
them as two structs inside an enum makes the invalid mixes (a demo with a plan, a trial
without an end date) unrepresentable. `#[serde(untagged)]` keeps the JSON flat, so a
lead serializes exactly as its variant's fields with no wrapper or type tag; clients
tell the kinds apart by `plan` versus `preferredDate`.
*/

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::id::RecordId;
use crate::timestamp::iso_millis;

pub const TRIAL_LENGTH_DAYS: i64 = 14;
pub const DEFAULT_TRIAL_COMPANY: &str = "Personal";
pub const DEFAULT_TEAM_SIZE: &str = "1-5";
pub const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Trial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Active,
    Pending,
}

/// A 14-day trial account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialLead {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub team_size: String,
    pub plan: Plan,
    #[serde(with = "iso_millis")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub end_date: DateTime<Utc>,
    pub status: LeadStatus,
}

impl TrialLead {
    /// Start a trial at `start`. The end date is derived here and nowhere else.
    pub fn new(
        id: RecordId,
        name: String,
        email: String,
        company: Option<String>,
        team_size: Option<String>,
        start: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            company: company.unwrap_or_else(|| DEFAULT_TRIAL_COMPANY.to_string()),
            team_size: team_size.unwrap_or_else(|| DEFAULT_TEAM_SIZE.to_string()),
            plan: Plan::Trial,
            start_date: start,
            end_date: start + Duration::days(TRIAL_LENGTH_DAYS),
            status: LeadStatus::Active,
        }
    }
}

/// A request for a product demo. `preferred_date` is kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoLead {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub preferred_date: String,
    pub timezone: String,
    pub status: LeadStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl DemoLead {
    pub fn new(
        id: RecordId,
        name: String,
        email: String,
        company: Option<String>,
        preferred_date: String,
        timezone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            company,
            preferred_date,
            timezone: timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            status: LeadStatus::Pending,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LeadRecord {
    Trial(TrialLead),
    Demo(DemoLead),
}

impl LeadRecord {
    pub fn id(&self) -> RecordId {
        match self {
            LeadRecord::Trial(trial) => trial.id,
            LeadRecord::Demo(demo) => demo.id,
        }
    }

    pub fn plan(&self) -> Option<Plan> {
        match self {
            LeadRecord::Trial(trial) => Some(trial.plan),
            LeadRecord::Demo(_) => None,
        }
    }

    pub fn status(&self) -> LeadStatus {
        match self {
            LeadRecord::Trial(trial) => trial.status,
            LeadRecord::Demo(demo) => demo.status,
        }
    }

    pub fn is_trial(&self) -> bool {
        self.plan() == Some(Plan::Trial)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == LeadStatus::Pending
    }
}

impl From<TrialLead> for LeadRecord {
    fn from(trial: TrialLead) -> Self {
        LeadRecord::Trial(trial)
    }
}

impl From<DemoLead> for LeadRecord {
    fn from(demo: DemoLead) -> Self {
        LeadRecord::Demo(demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use expect_test::expect;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_trial_defaults_and_window() {
        let trial = TrialLead::new(
            RecordId::new(1),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            None,
            None,
            start(),
        );
        assert_eq!(trial.company, "Personal");
        assert_eq!(trial.team_size, "1-5");
        assert_eq!(trial.end_date - trial.start_date, Duration::days(14));
    }

    #[test]
    fn test_trial_serialization() {
        let lead = LeadRecord::from(TrialLead::new(
            RecordId::new(1714555800000),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            Some("Acme".to_string()),
            Some("6-20".to_string()),
            start(),
        ));
        expect![[r#"{"id":1714555800000,"name":"Ana","email":"ana@example.com","company":"Acme","teamSize":"6-20","plan":"trial","startDate":"2024-05-01T09:30:00.000Z","endDate":"2024-05-15T09:30:00.000Z","status":"active"}"#]]
            .assert_eq(&serde_json::to_string(&lead).unwrap());
    }

    #[test]
    fn test_demo_serialization_omits_missing_company() {
        let lead = LeadRecord::from(DemoLead::new(
            RecordId::new(2),
            "Bo".to_string(),
            "bo@example.com".to_string(),
            None,
            "2024-06-01T15:00".to_string(),
            None,
            start(),
        ));
        expect![[r#"{"id":2,"name":"Bo","email":"bo@example.com","preferredDate":"2024-06-01T15:00","timezone":"UTC","status":"pending","createdAt":"2024-05-01T09:30:00.000Z"}"#]]
            .assert_eq(&serde_json::to_string(&lead).unwrap());
    }

    #[test]
    fn test_classification() {
        let trial = LeadRecord::from(TrialLead::new(
            RecordId::new(1),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            None,
            None,
            start(),
        ));
        let demo = LeadRecord::from(DemoLead::new(
            RecordId::new(2),
            "Bo".to_string(),
            "bo@example.com".to_string(),
            None,
            "tomorrow".to_string(),
            Some("Europe/Berlin".to_string()),
            start(),
        ));

        assert!(trial.is_trial() && !trial.is_pending());
        assert!(!demo.is_trial() && demo.is_pending());
        assert_eq!(demo.id(), RecordId::new(2));
    }
}
