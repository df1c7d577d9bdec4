pub mod admin_service;
pub mod application_service;
pub mod candidate_service;
pub mod media_service;
pub mod position_service;
