use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::search_dto::{SearchRequest, SearchResponse};
use crate::error::{Error, Result};
use crate::models::listing::{JobListing, ListingQuery};

/// Anything that can answer a job search: the bundled mock board or a real
/// listing API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<JobListing>>;
}

/// What the search panel currently shows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView {
    #[default]
    Idle,
    Loading {
        seq: u64,
    },
    Ready {
        seq: u64,
        items: Vec<JobListing>,
    },
    Failed {
        seq: u64,
        message: String,
    },
}

#[derive(Clone)]
pub struct SearchService {
    provider: Arc<dyn JobSearchProvider>,
    latest_seq: Arc<AtomicU64>,
    view: Arc<RwLock<ResultsView>>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn JobSearchProvider>) -> Self {
        Self {
            provider,
            latest_seq: Arc::new(AtomicU64::new(0)),
            view: Arc::new(RwLock::new(ResultsView::Idle)),
        }
    }

    pub fn results_view(&self) -> ResultsView {
        self.view
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Runs one search. Every call gets a sequence number; only the newest
    /// search may update the results view, older responses come back marked
    /// stale.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        request.validate()?;
        let query = ListingQuery {
            text: request.query.trim().to_string(),
            location: non_blank(request.location),
            job_type: non_blank(request.job_type),
        };
        if query.text.is_empty() {
            return Err(Error::required("query", "Please enter a search term"));
        }

        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(seq, ResultsView::Loading { seq });
        info!(seq, "Searching job listings");

        match self.provider.search(&query).await {
            Ok(items) => {
                let stale = !self.publish(
                    seq,
                    ResultsView::Ready {
                        seq,
                        items: items.clone(),
                    },
                );
                if stale {
                    debug!(seq, "Dropping stale search results");
                }
                Ok(SearchResponse { seq, stale, items })
            }
            Err(e) => {
                warn!(seq, error = %e, "Job search failed");
                self.publish(
                    seq,
                    ResultsView::Failed {
                        seq,
                        message: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Replaces the view if `seq` is still the newest search. Returns whether
    /// the view was updated.
    fn publish(&self, seq: u64, next: ResultsView) -> bool {
        let mut view = self
            .view
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            return false;
        }
        *view = next;
        true
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
