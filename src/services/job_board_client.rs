use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::models::listing::{JobListing, ListingQuery};
use crate::services::search_service::JobSearchProvider;

/// Listing API client: `GET {base_url}?q=..&location=..&type=..` with a
/// bearer token, answering with a JSON array of listings.
#[derive(Clone)]
pub struct JobBoardClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl JobBoardClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn query_params(query: &ListingQuery) -> Vec<(&'static str, &str)> {
        let mut params = vec![("q", query.text.as_str())];
        if let Some(location) = &query.location {
            params.push(("location", location.as_str()));
        }
        if let Some(job_type) = &query.job_type {
            params.push(("type", job_type.as_str()));
        }
        params
    }
}

#[async_trait]
impl JobSearchProvider for JobBoardClient {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<JobListing>> {
        tracing::info!("Fetching job listings from: {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .bearer_auth(&self.api_key)
            .query(&Self::query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Listing API returned status {}", status);
            return Err(Error::SearchProvider(format!(
                "listing service returned {}",
                status
            )));
        }

        let listings = response.json::<Vec<JobListing>>().await?;
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_filters_become_params() {
        let query = ListingQuery {
            text: "rust".into(),
            location: Some("Remote".into()),
            job_type: None,
        };
        assert_eq!(
            JobBoardClient::query_params(&query),
            vec![("q", "rust"), ("location", "Remote")]
        );
    }
}
