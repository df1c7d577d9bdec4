pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    admin_service::AdminService, application_service::ApplicationService,
    candidate_service::CandidateService, media_service::MediaService,
    position_service::PositionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub admin_service: AdminService,
    pub position_service: PositionService,
    pub application_service: ApplicationService,
    pub candidate_service: CandidateService,
    pub media_service: MediaService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let admin_service = AdminService::new(pool.clone());
        let position_service = PositionService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let media_service = MediaService::new(config.uploads_dir.clone());

        Self {
            pool,
            admin_service,
            position_service,
            application_service,
            candidate_service,
            media_service,
        }
    }
}
