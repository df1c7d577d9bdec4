use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One person per email. `aliases` holds alternate names seen for the same
/// address, comma-joined (e.g. "Hamid Alaoui, Hicham Lgarouj").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub aliases: Option<String>,
}
