use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A posting returned by a job listing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
}

/// What a job search asks a provider for. Blank filters mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub text: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
}
