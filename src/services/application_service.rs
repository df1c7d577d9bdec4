use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::dto::application_dto::{
    ApplicationCandidateDetail, ApplicationDetailResponse, ApplicationListItem,
    ApplicationListResponse, ApplicationPositionDetail, CandidateSummary, PositionBrief,
};
use crate::error::Result;
use crate::models::application::Application;
use crate::models::candidate::Candidate;

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

/// Lowercase the whole name, then title-case each whitespace-separated
/// token: "JOHN doe" -> "John Doe".
pub fn normalize_full_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the new alias string when the submitted name must be recorded:
/// it differs from the stored name and is not already listed. Aliases grow
/// monotonically; a name never appears twice.
fn merged_aliases(stored_name: &str, aliases: Option<&str>, submitted: &str) -> Option<String> {
    if stored_name == submitted {
        return None;
    }
    let mut list: Vec<String> = aliases
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if list.iter().any(|a| a == submitted) {
        return None;
    }
    list.push(submitted.to_string());
    Some(list.join(", "))
}

#[derive(Debug, FromRow)]
struct ApplicationListRow {
    id: i32,
    created_at: DateTime<Utc>,
    resume_file_name: String,
    candidate_id: Option<i32>,
    candidate_full_name: Option<String>,
    candidate_email: Option<String>,
    position_id: Option<i32>,
    position_title: Option<String>,
    position_category: Option<String>,
}

#[derive(Debug, FromRow)]
struct ApplicationDetailRow {
    id: i32,
    created_at: DateTime<Utc>,
    resume_file_name: String,
    resume_file_path: String,
    candidate_id: Option<i32>,
    candidate_full_name: Option<String>,
    candidate_email: Option<String>,
    candidate_aliases: Option<String>,
    position_id: Option<i32>,
    position_title: Option<String>,
    position_category: Option<String>,
    position_work_type: Option<String>,
    position_location: Option<String>,
    position_description: Option<String>,
    position_status: Option<String>,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves the candidate by email and records the application in one
    /// transaction. The candidate row is locked so concurrent submissions
    /// for the same email serialize instead of racing the alias update.
    pub async fn create(
        &self,
        position_id: i32,
        full_name: &str,
        email: &str,
        resume_file_name: &str,
        resume_file_path: &str,
    ) -> Result<Application> {
        let formatted_name = normalize_full_name(full_name);

        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE email = $1 FOR UPDATE")
                .bind(email)
                .fetch_optional(&mut *tx)
                .await?;

        let candidate_id = match existing {
            Some(candidate) => {
                if let Some(aliases) = merged_aliases(
                    &candidate.full_name,
                    candidate.aliases.as_deref(),
                    &formatted_name,
                ) {
                    sqlx::query("UPDATE candidates SET aliases = $1 WHERE id = $2")
                        .bind(&aliases)
                        .bind(candidate.id)
                        .execute(&mut *tx)
                        .await?;
                }
                candidate.id
            }
            None => {
                sqlx::query_scalar::<_, i32>(
                    "INSERT INTO candidates (full_name, email) VALUES ($1, $2) RETURNING id",
                )
                .bind(&formatted_name)
                .bind(email)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let application = sqlx::query_as::<_, Application>(
            "INSERT INTO applications (candidate_id, position_id, resume_file_name, resume_file_path)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(candidate_id)
        .bind(position_id)
        .bind(resume_file_name)
        .bind(resume_file_path)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<ApplicationListResponse> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let rows = sqlx::query_as::<_, ApplicationListRow>(
            "SELECT a.id, a.created_at, a.resume_file_name,
                    c.id AS candidate_id, c.full_name AS candidate_full_name, c.email AS candidate_email,
                    p.id AS position_id, p.title AS position_title, p.category AS position_category
             FROM applications a
             LEFT JOIN candidates c ON a.candidate_id = c.id
             LEFT JOIN positions p ON a.position_id = p.id
             ORDER BY a.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;

        let data = rows
            .into_iter()
            .map(|row| {
                let candidate = match (
                    row.candidate_id,
                    row.candidate_full_name,
                    row.candidate_email,
                ) {
                    (Some(id), Some(full_name), Some(email)) => Some(CandidateSummary {
                        id,
                        full_name,
                        email,
                    }),
                    _ => None,
                };
                let position = match (row.position_id, row.position_title, row.position_category) {
                    (Some(id), Some(title), Some(category)) => Some(PositionBrief {
                        id,
                        title,
                        category,
                    }),
                    _ => None,
                };
                ApplicationListItem {
                    id: row.id,
                    created_at: row.created_at,
                    resume_file_name: row.resume_file_name,
                    candidate,
                    position,
                }
            })
            .collect();

        Ok(ApplicationListResponse {
            data,
            total,
            page,
            limit,
            total_pages: ((total as f64) / (limit as f64)).ceil() as i64,
        })
    }

    /// Detail without the resume body; the caller loads it from the store
    /// and fills `resume_file_b64`.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<ApplicationDetailResponse>> {
        let row = sqlx::query_as::<_, ApplicationDetailRow>(
            "SELECT a.id, a.created_at, a.resume_file_name, a.resume_file_path,
                    c.id AS candidate_id, c.full_name AS candidate_full_name,
                    c.email AS candidate_email, c.aliases AS candidate_aliases,
                    p.id AS position_id, p.title AS position_title, p.category AS position_category,
                    p.work_type AS position_work_type, p.location AS position_location,
                    p.description AS position_description, p.status AS position_status
             FROM applications a
             LEFT JOIN candidates c ON a.candidate_id = c.id
             LEFT JOIN positions p ON a.position_id = p.id
             WHERE a.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let candidate = match (
                row.candidate_id,
                row.candidate_full_name,
                row.candidate_email,
            ) {
                (Some(id), Some(full_name), Some(email)) => Some(ApplicationCandidateDetail {
                    id,
                    full_name,
                    email,
                    aliases: row.candidate_aliases,
                }),
                _ => None,
            };
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
            ApplicationDetailResponse {
                id: row.id,
                created_at: row.created_at,
                resume_file_name: row.resume_file_name,
                resume_file_path: row.resume_file_path,
                candidate,
                position,
                resume_file_b64: None,
            }
        }))
    }
}
