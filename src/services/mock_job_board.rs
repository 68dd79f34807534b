use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::models::listing::{JobListing, ListingQuery};
use crate::services::search_service::JobSearchProvider;

/// Offline stand-in for a listing API: a fixed set of postings served after
/// an artificial delay.
#[derive(Debug, Clone)]
pub struct MockJobBoard {
    delay: Duration,
    listings: Vec<JobListing>,
}

impl MockJobBoard {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            listings: sample_listings(),
        }
    }
}

#[async_trait]
impl JobSearchProvider for MockJobBoard {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<JobListing>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let text = query.text.to_lowercase();
        let location = query.location.as_deref().map(str::to_lowercase);
        let job_type = query.job_type.as_deref().map(str::to_lowercase);

        let matches: Vec<JobListing> = self
            .listings
            .iter()
            .filter(|listing| {
                let matches_text = listing.title.to_lowercase().contains(&text)
                    || listing.company.to_lowercase().contains(&text);
                let matches_location = location
                    .as_deref()
                    .map_or(true, |l| listing.location.to_lowercase().contains(l));
                let matches_type = job_type
                    .as_deref()
                    .map_or(true, |t| listing.job_type.to_lowercase().contains(t));
                matches_text && matches_location && matches_type
            })
            .cloned()
            .collect();

        debug!(count = matches.len(), "Mock job board answered");
        Ok(matches)
    }
}

fn sample_listings() -> Vec<JobListing> {
    let listing = |title: &str, company: &str, location: &str, job_type: &str, description: &str, url: &str| {
        JobListing {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            posted_date: None,
            salary: None,
        }
    };

    vec![
        listing(
            "Senior Frontend Developer",
            "TechCorp",
            "Remote",
            "Full-time",
            "Looking for an experienced frontend developer with React skills to join our growing team.",
            "https://example.com/job/123",
        ),
        listing(
            "Full Stack Engineer",
            "WebSolutions",
            "New York, NY",
            "Full-time",
            "Join our team to build amazing web applications with modern technologies like Node.js and React.",
            "https://example.com/job/456",
        ),
        listing(
            "UI/UX Designer",
            "DesignHub",
            "San Francisco, CA",
            "Contract",
            "Create beautiful user interfaces for our clients. Must have experience with Figma and Adobe Creative Suite.",
            "https://example.com/job/789",
        ),
        listing(
            "Backend Developer",
            "DataSystems",
            "Remote",
            "Full-time",
            "Work on our scalable backend systems using Python and Django. Experience with AWS required.",
            "https://example.com/job/101",
        ),
        listing(
            "Product Manager",
            "InnovateCo",
            "Chicago, IL",
            "Full-time",
            "Lead product development from conception to launch. 5+ years of PM experience required.",
            "https://example.com/job/112",
        ),
    ]
}
