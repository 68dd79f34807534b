use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::listing::JobListing;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "Search term is too long"))]
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub seq: u64,
    /// A newer search started before this one finished; the results view
    /// kept the newer outcome.
    pub stale: bool,
    pub items: Vec<JobListing>,
}
