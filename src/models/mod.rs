pub mod application;
pub mod listing;
pub mod preference;
pub mod query;
pub mod stats;
