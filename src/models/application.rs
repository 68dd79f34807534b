use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle stage of an application. Any status may follow any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
pub enum ApplicationStatus {
    Saved,
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Chart order.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Saved,
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "Saved",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Still in play: neither rejected nor already an offer.
    pub fn is_active(&self) -> bool {
        !matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Offer)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown application status '{}'", wanted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Interview {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "blank_as_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub prep: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub feedback: Option<String>,
}

impl Interview {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.kind.is_none() && self.prep.is_none() && self.feedback.is_none()
    }
}

/// One tracked job application. Field names on the wire match the shape the
/// browser tracker kept in local storage, so its exported data loads as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub date: NaiveDate,
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub interview: Interview,
    pub created_at: DateTime<Utc>,
}

/// Parses an optional value through `FromStr`, treating `null`, `""` and
/// whitespace as absent. Form inputs post empty strings for unset selects.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Ids written by the browser tracker are millisecond timestamps stored as
/// JSON numbers; newer ids are strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_record_in_browser_storage_shape() {
        let raw = json!({
            "id": "1717171717171",
            "title": "Engineer",
            "company": "Acme",
            "date": "2024-05-31",
            "status": "Interview",
            "priority": "",
            "url": "",
            "location": "Remote",
            "salary": "$120,000 - $160,000",
            "notes": "",
            "interview": { "date": "2024-06-03T10:00", "type": "Video", "prep": "", "feedback": "" },
            "createdAt": "2024-05-31T09:15:00.000Z"
        });

        let application: JobApplication = serde_json::from_value(raw).unwrap();
        assert_eq!(application.id, "1717171717171");
        assert_eq!(application.status, ApplicationStatus::Interview);
        assert_eq!(application.priority, None);
        assert_eq!(application.interview.kind.as_deref(), Some("Video"));
        assert_eq!(application.date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(application.url, None);
        assert_eq!(application.interview.prep, None);
    }

    #[test]
    fn numeric_timestamp_id_loads_as_text() {
        let raw = json!({
            "id": 1717171717171u64,
            "title": "Engineer",
            "company": "Acme",
            "date": "2024-05-31",
            "status": "Saved",
            "createdAt": "2024-05-31T09:15:00Z"
        });
        let application: JobApplication = serde_json::from_value(raw).unwrap();
        assert_eq!(application.id, "1717171717171");
    }

    #[test]
    fn rejects_unknown_status() {
        let raw = json!({
            "id": "1",
            "title": "Engineer",
            "company": "Acme",
            "date": "2024-05-31",
            "status": "Ghosted",
            "createdAt": "2024-05-31T09:15:00Z"
        });
        assert!(serde_json::from_value::<JobApplication>(raw).is_err());
    }

    #[test]
    fn only_rejected_and_offer_are_inactive() {
        let inactive: Vec<_> = ApplicationStatus::ALL
            .into_iter()
            .filter(|s| !s.is_active())
            .collect();
        assert_eq!(inactive, vec![ApplicationStatus::Offer, ApplicationStatus::Rejected]);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("interview".parse(), Ok(ApplicationStatus::Interview));
        assert!("all".parse::<ApplicationStatus>().is_err());
    }
}
