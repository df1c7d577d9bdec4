use sqlx::PgPool;

use crate::dto::admin_dto::{AdminListQuery, CreateAdminPayload, UpdateAdminPayload};
use crate::error::{Error, Result};
use crate::models::admin::{Admin, ROLE_STANDARD, ROLE_SUPERADMIN, STATUS_DELETED};
use crate::utils::{crypto, jwt};

const LOGIN_ERROR: &str = "Incorrect Email or password";

/// Lock key for serializing first-admin bootstrap against the zero-count
/// check. Two concurrent bootstraps queue here; the loser sees count > 0.
const BOOTSTRAP_LOCK_KEY: i64 = 815_001;

#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

pub struct AdminList {
    pub items: Vec<Admin>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_admins(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Creates an administrator. While the table is empty no acting identity
    /// is needed and the account is forced to superadmin; afterwards only a
    /// superadmin may create accounts. The count check and insert share one
    /// transaction under an advisory lock so concurrent bootstraps cannot
    /// both pass the empty-table check.
    pub async fn create_admin(
        &self,
        payload: CreateAdminPayload,
        acting: Option<&jwt::Claims>,
    ) -> Result<Admin> {
        let requested_role = match payload.role.as_deref() {
            None => ROLE_STANDARD.to_string(),
            Some(r) if r == ROLE_STANDARD || r == ROLE_SUPERADMIN => r.to_string(),
            Some(other) => {
                return Err(Error::BadRequest(format!("Unknown role: {}", other)));
            }
        };

        let hashed_password = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&mut *tx)
            .await?;

        let (role, created_by_admin_id) = if count == 0 {
            (ROLE_SUPERADMIN.to_string(), None)
        } else {
            let Some(acting) = acting else {
                return Err(Error::Unauthorized(
                    "Missing authorization header".to_string(),
                ));
            };
            if !acting.is_superadmin() {
                return Err(Error::Forbidden("Superadmin role required".to_string()));
            }
            (requested_role, Some(acting.admin_id()?))
        };

        let exists = sqlx::query_scalar::<_, i32>("SELECT id FROM admins WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_some() {
            return Err(Error::AlreadyExists(
                "An administrator with this email already exists".to_string(),
            ));
        }

        let admin = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (first_name, last_name, email, hashed_password, role, created_by_admin_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&hashed_password)
        .bind(&role)
        .bind(created_by_admin_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(admin)
    }

    pub async fn list(&self, query: AdminListQuery) -> Result<AdminList> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;
        let status = query.status.unwrap_or_else(|| "active".to_string());

        let where_clause = match status.as_str() {
            "all" => "".to_string(),
            "active" | "deleted" => "WHERE status = $3".to_string(),
            other => {
                return Err(Error::BadRequest(format!(
                    "Unknown status filter: {}",
                    other
                )));
            }
        };

        let items_query = format!(
            "SELECT * FROM admins {} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            where_clause
        );
        let mut items_statement = sqlx::query_as::<_, Admin>(&items_query)
            .bind(limit)
            .bind(offset);
        if !where_clause.is_empty() {
            items_statement = items_statement.bind(status.clone());
        }
        let items = items_statement.fetch_all(&self.pool).await?;

        let total_query = format!(
            "SELECT COUNT(*) FROM admins {}",
            where_clause.replace("$3", "$1")
        );
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        if !where_clause.is_empty() {
            total_statement = total_statement.bind(status);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (limit as f64)).ceil() as i64;

        Ok(AdminList {
            items,
            total,
            page,
            limit,
            total_pages,
        })
    }

    pub async fn update_admin(&self, id: i32, payload: UpdateAdminPayload) -> Result<Admin> {
        if let Some(role) = payload.role.as_deref() {
            if role != ROLE_STANDARD && role != ROLE_SUPERADMIN {
                return Err(Error::BadRequest(format!("Unknown role: {}", role)));
            }
        }

        let existing = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Administrator not found".to_string()))?;

        if existing.status == STATUS_DELETED {
            return Err(Error::BadRequest(
                "A deleted administrator cannot be updated".to_string(),
            ));
        }

        if let Some(email) = payload.email.as_deref() {
            if email != existing.email {
                let taken =
                    sqlx::query_scalar::<_, i32>("SELECT id FROM admins WHERE email = $1")
                        .bind(email)
                        .fetch_optional(&self.pool)
                        .await?;
                if taken.is_some() {
                    return Err(Error::AlreadyExists(
                        "An administrator with this email already exists".to_string(),
                    ));
                }
            }
        }

        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 email = COALESCE($4, email),
                 role = COALESCE($5, role),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Flips active <-> deleted. Idempotent in the flip sense: every call on
    /// a valid id succeeds and toggles.
    pub async fn toggle_status(&self, id: i32) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins
             SET status = CASE WHEN status = 'active' THEN 'deleted' ELSE 'active' END,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Administrator not found".to_string()))?;

        Ok(admin)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    /// The failure message never distinguishes an unknown email from a wrong
    /// password (or a deactivated account).
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Admin)> {
        let admin = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| Error::BadRequest(LOGIN_ERROR.to_string()))?;

        if admin.status == STATUS_DELETED {
            return Err(Error::BadRequest(LOGIN_ERROR.to_string()));
        }

        let ok = crypto::verify_password(password, &admin.hashed_password)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::BadRequest(LOGIN_ERROR.to_string()));
        }

        let config = crate::config::get_config();
        let token = jwt::encode_token(&admin, &config.jwt_secret)?;
        Ok((token, admin))
    }
}
