use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::application::{
    blank_as_none, ApplicationStatus, Interview, JobApplication, Priority,
};
use crate::models::listing::JobListing;
use crate::models::query::{SortKey, StatusFilter};
use crate::models::stats::{ApplicationStats, StatsProgress, StatusCount};
use crate::utils::salary::extract_salary;

/// Editable field values of an application: what the add/edit form submits
/// and what an edit pre-fills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Job title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    pub notes: Option<String>,
    #[serde(default)]
    pub interview: Interview,
}

impl ApplicationPayload {
    /// Trims every text field and turns blank optional text into `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            url: non_blank(self.url),
            location: non_blank(self.location),
            salary: non_blank(self.salary),
            notes: non_blank(self.notes),
            interview: Interview {
                date: non_blank(self.interview.date),
                kind: non_blank(self.interview.kind),
                prep: non_blank(self.interview.prep),
                feedback: non_blank(self.interview.feedback),
            },
            ..self
        }
    }
}

impl From<&JobApplication> for ApplicationPayload {
    fn from(value: &JobApplication) -> Self {
        Self {
            title: value.title.clone(),
            company: value.company.clone(),
            date: Some(value.date),
            status: value.status,
            priority: value.priority,
            url: value.url.clone(),
            location: value.location.clone(),
            salary: value.salary.clone(),
            notes: value.notes.clone(),
            interview: value.interview.clone(),
        }
    }
}

/// Pre-filled draft for tracking a posting found through job search.
impl From<JobListing> for ApplicationPayload {
    fn from(value: JobListing) -> Self {
        Self {
            title: value.title,
            company: value.company,
            status: ApplicationStatus::Saved,
            url: Some(value.url),
            location: Some(value.location),
            salary: value.salary,
            ..Default::default()
        }
        .normalized()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(non_blank(opt))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub date: NaiveDate,
    pub status: ApplicationStatus,
    pub priority: Option<Priority>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    /// Amount the salary sort orders by.
    pub extracted_salary: f64,
    pub notes: Option<String>,
    pub interview: Interview,
    pub created_at: DateTime<Utc>,
}

impl From<JobApplication> for ApplicationResponse {
    fn from(value: JobApplication) -> Self {
        let extracted_salary = extract_salary(value.salary.as_deref());
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            date: value.date,
            status: value.status,
            priority: value.priority,
            url: value.url,
            location: value.location,
            salary: value.salary,
            extracted_salary,
            notes: value.notes,
            interview: value.interview,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
    /// Number of items matching the filters.
    pub total: usize,
    /// Size of the whole collection.
    pub stored: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub sort: Option<SortKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimelineQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EditDraftResponse {
    pub id: String,
    pub draft: ApplicationPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counts: ApplicationStats,
    pub progress: StatsProgress,
}

impl From<ApplicationStats> for StatsResponse {
    fn from(value: ApplicationStats) -> Self {
        Self {
            counts: value,
            progress: value.progress(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusBreakdownResponse {
    pub items: Vec<StatusCount>,
}
