//! Durable key-value storage the tracker mirrors its state into.
//!
//! Each key holds one whole document; writers always replace the full value.

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

use crate::error::Result;

/// Key holding the full application collection as a JSON array.
pub const APPLICATIONS_KEY: &str = "jobs";
/// Where an unreadable collection is parked before the store starts empty.
pub const CORRUPT_APPLICATIONS_KEY: &str = "jobs.corrupt";
/// Key holding the theme preference.
pub const THEME_KEY: &str = "theme";

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
