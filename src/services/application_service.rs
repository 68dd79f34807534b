use std::sync::{Arc, Mutex, MutexGuard};

use crate::dto::application_dto::{ApplicationListQuery, ApplicationPayload};
use crate::error::{Error, Result};
use crate::models::application::JobApplication;
use crate::models::stats::{ApplicationStats, StatusCount};
use crate::services::application_store::{ApplicationStore, DEFAULT_TIMELINE_LIMIT};
use crate::storage::KeyValueStorage;

const MAX_TIMELINE_LIMIT: usize = 50;

/// Shared handle to the store. Each command holds the lock for its whole
/// run, so mutations stay strictly one at a time.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<Mutex<ApplicationStore>>,
}

impl ApplicationService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            store: Arc::new(Mutex::new(ApplicationStore::load(storage))),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, ApplicationStore>> {
        self.store
            .lock()
            .map_err(|_| Error::Internal("application store lock poisoned".to_string()))
    }

    pub fn create(&self, payload: ApplicationPayload) -> Result<JobApplication> {
        self.store()?.add(payload)
    }

    pub fn get_by_id(&self, id: &str) -> Result<JobApplication> {
        self.store()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub fn begin_edit(&self, id: &str) -> Result<ApplicationPayload> {
        self.store()?
            .begin_edit(id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub fn update(&self, id: &str, payload: ApplicationPayload) -> Result<JobApplication> {
        self.store()?.commit_edit(id, payload)
    }

    pub fn cancel_edit(&self, id: &str) -> Result<bool> {
        Ok(self.store()?.cancel_edit(id))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store()?.remove(id)
    }

    /// Filtered, sorted view plus the size of the whole collection.
    pub fn list(&self, query: ApplicationListQuery) -> Result<(Vec<JobApplication>, usize)> {
        let store = self.store()?;
        let items = store.query(
            query.search.as_deref().unwrap_or(""),
            query.status.unwrap_or_default(),
            query.sort.unwrap_or_default(),
        );
        Ok((items, store.len()))
    }

    pub fn stats(&self) -> Result<ApplicationStats> {
        Ok(self.store()?.stats())
    }

    pub fn status_breakdown(&self) -> Result<Vec<StatusCount>> {
        Ok(self.store()?.status_breakdown())
    }

    pub fn timeline(&self, limit: Option<usize>) -> Result<Vec<JobApplication>> {
        let limit = limit
            .unwrap_or(DEFAULT_TIMELINE_LIMIT)
            .clamp(1, MAX_TIMELINE_LIMIT);
        Ok(self.store()?.timeline(limit))
    }
}
