use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::dto::application_dto::ApplicationPositionDetail;
use crate::dto::candidate_dto::{
    CandidateApplicationItem, CandidateDetailResponse, CandidateListItem, CandidateListResponse,
};
use crate::error::Result;
use crate::models::candidate::Candidate;

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct CandidateCountRow {
    id: i32,
    full_name: String,
    email: String,
    aliases: Option<String>,
    application_count: i64,
}

#[derive(Debug, FromRow)]
struct CandidateApplicationRow {
    id: i32,
    created_at: DateTime<Utc>,
    resume_file_name: String,
    resume_file_path: String,
    position_id: Option<i32>,
    position_title: Option<String>,
    position_category: Option<String>,
    position_work_type: Option<String>,
    position_location: Option<String>,
    position_description: Option<String>,
    position_status: Option<String>,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<CandidateListResponse> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let rows = sqlx::query_as::<_, CandidateCountRow>(
            "SELECT c.id, c.full_name, c.email, c.aliases,
                    (SELECT COUNT(*) FROM applications a WHERE a.candidate_id = c.id) AS application_count
             FROM candidates c
             ORDER BY c.id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;

        let data = rows
            .into_iter()
            .map(|row| CandidateListItem {
                id: row.id,
                full_name: row.full_name,
                email: row.email,
                aliases: row.aliases,
                application_count: row.application_count,
            })
            .collect();

        Ok(CandidateListResponse {
            data,
            total,
            page,
            limit,
            total_pages: ((total as f64) / (limit as f64)).ceil() as i64,
        })
    }

    /// Candidate with all applications, resumes left for the caller to load.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<CandidateDetailResponse>> {
        let candidate = sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(candidate) = candidate else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, CandidateApplicationRow>(
            "SELECT a.id, a.created_at, a.resume_file_name, a.resume_file_path,
                    p.id AS position_id, p.title AS position_title, p.category AS position_category,
                    p.work_type AS position_work_type, p.location AS position_location,
                    p.description AS position_description, p.status AS position_status
             FROM applications a
             LEFT JOIN positions p ON a.position_id = p.id
             WHERE a.candidate_id = $1
             ORDER BY a.created_at DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let applications = rows
            .into_iter()
            .map(|row| {
                let position = match (
                    row.position_id,
                    row.position_title,
                    row.position_category,
                    row.position_work_type,
                    row.position_description,
                    row.position_status,
                ) {
                    (
                        Some(id),
                        Some(title),
                        Some(category),
                        Some(work_type),
                        Some(description),
                        Some(status),
                    ) => Some(ApplicationPositionDetail {
                        id,
                        title,
                        category,
                        work_type,
                        location: row.position_location,
                        description,
                        status,
                    }),
                    _ => None,
                };
                CandidateApplicationItem {
                    id: row.id,
                    created_at: row.created_at,
                    resume_file_name: row.resume_file_name,
                    resume_file_path: row.resume_file_path,
                    position,
                    resume_file_b64: None,
                }
            })
            .collect();

        Ok(Some(CandidateDetailResponse {
            id: candidate.id,
            full_name: candidate.full_name,
            email: candidate.email,
            aliases: candidate.aliases,
            applications,
        }))
    }
}
