use sqlx::PgPool;

use crate::dto::position_dto::{CreatePositionPayload, PositionListQuery, UpdatePositionPayload};
use crate::error::{Error, Result};
use crate::models::position::{Position, DEFAULT_WORK_TYPE, WORK_TYPES};

#[derive(Clone)]
pub struct PositionService {
    pool: PgPool,
}

pub struct PositionList {
    pub items: Vec<Position>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

fn check_work_type(work_type: &str) -> Result<()> {
    if !WORK_TYPES.contains(&work_type) {
        return Err(Error::BadRequest(format!(
            "Unknown work type: {}",
            work_type
        )));
    }
    Ok(())
}

impl PositionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: CreatePositionPayload,
        created_by_admin_id: i32,
    ) -> Result<Position> {
        let work_type = payload
            .work_type
            .unwrap_or_else(|| DEFAULT_WORK_TYPE.to_string());
        check_work_type(&work_type)?;

        let position = sqlx::query_as::<_, Position>(
            "INSERT INTO positions (title, category, work_type, location, description, created_by_admin_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&payload.title)
        .bind(&payload.category)
        .bind(&work_type)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(created_by_admin_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(position)
    }

    /// Soft-deleted rows are invisible to every read.
    pub async fn list(&self, query: PositionListQuery) -> Result<PositionList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let mut filters = vec!["status = 'active'".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(category) = query.category {
            filters.push(format!("category = ${}", args.len() + 1));
            args.push(category);
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));

        let items_query = format!(
            "SELECT * FROM positions {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let mut items_statement = sqlx::query_as::<_, Position>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(limit).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let total_query = format!("SELECT COUNT(*) FROM positions {}", where_clause);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (limit as f64)).ceil() as i64;

        Ok(PositionList {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn get_active(&self, id: i32) -> Result<Option<Position>> {
        let position = sqlx::query_as::<_, Position>(
            "SELECT * FROM positions WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(position)
    }

    pub async fn update(&self, id: i32, payload: UpdatePositionPayload) -> Result<Position> {
        if let Some(work_type) = payload.work_type.as_deref() {
            check_work_type(work_type)?;
        }

        let position = sqlx::query_as::<_, Position>(
            "UPDATE positions
             SET title = COALESCE($2, title),
                 category = COALESCE($3, category),
                 work_type = COALESCE($4, work_type),
                 location = COALESCE($5, location),
                 description = COALESCE($6, description),
                 updated_at = NOW()
             WHERE id = $1 AND status = 'active'
             RETURNING *",
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.category)
        .bind(payload.work_type)
        .bind(payload.location)
        .bind(payload.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Position not found".to_string()))?;

        Ok(position)
    }

    pub async fn soft_delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query(
            "UPDATE positions SET status = 'deleted', updated_at = NOW()
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Position not found".to_string()));
        }
        Ok(())
    }
}
