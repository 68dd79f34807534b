pub mod application_dto;
pub mod preference_dto;
pub mod search_dto;
