pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, SearchProviderKind};
use crate::error::{Error, Result};
use crate::models::preference::Theme;
use crate::services::{
    application_service::ApplicationService,
    job_board_client::JobBoardClient,
    mock_job_board::MockJobBoard,
    preference_service::PreferenceService,
    search_service::{JobSearchProvider, SearchService},
};
use crate::storage::{FileStorage, KeyValueStorage};

#[derive(Clone)]
pub struct AppState {
    pub application_service: ApplicationService,
    pub search_service: SearchService,
    pub preference_service: PreferenceService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let storage = FileStorage::new(config.storage_dir.clone())?;
        tracing::info!("Storing tracker data in {}", storage.dir().display());

        let provider: Arc<dyn JobSearchProvider> = match config.search_provider {
            SearchProviderKind::Mock => Arc::new(MockJobBoard::new(Duration::from_millis(
                config.search_delay_ms,
            ))),
            SearchProviderKind::Http => {
                let (Some(url), Some(key)) = (&config.search_api_url, &config.search_api_key)
                else {
                    return Err(Error::Config(
                        "SEARCH_API_URL and SEARCH_API_KEY are required for the http provider"
                            .to_string(),
                    ));
                };
                Arc::new(JobBoardClient::new(
                    url.clone(),
                    key.clone(),
                    Duration::from_secs(config.search_timeout_secs),
                )?)
            }
        };

        Ok(Self::from_parts(
            Arc::new(storage),
            provider,
            config.default_theme,
        ))
    }

    /// Wires the services over an already-built storage and provider.
    pub fn from_parts(
        storage: Arc<dyn KeyValueStorage>,
        provider: Arc<dyn JobSearchProvider>,
        default_theme: Theme,
    ) -> Self {
        Self {
            application_service: ApplicationService::new(storage.clone()),
            search_service: SearchService::new(provider),
            preference_service: PreferenceService::new(storage, default_theme),
        }
    }
}
