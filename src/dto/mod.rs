pub mod admin_dto;
pub mod application_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod position_dto;
