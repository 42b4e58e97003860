use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant as ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter writing `DateTime<Utc>` fields in the `to_iso_millis` format.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso_millis(instant))
    }
}
