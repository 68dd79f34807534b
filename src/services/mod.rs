pub mod application_service;
pub mod application_store;
pub mod export_service;
pub mod job_board_client;
pub mod mock_job_board;
pub mod preference_service;
pub mod search_service;
