use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::admin::Admin;

/// Tokens expire 9 hours after issuance.
const TOKEN_TTL_HOURS: i64 = 9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn admin_id(&self) -> Result<i32> {
        self.sub
            .parse()
            .map_err(|_| Error::Unauthorized("Invalid token subject".to_string()))
    }

    pub fn is_superadmin(&self) -> bool {
        self.role
            .eq_ignore_ascii_case(crate::models::admin::ROLE_SUPERADMIN)
    }
}

pub fn encode_token(account: &Admin, secret: &str) -> Result<String> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: account.id.to_string(),
        first_name: account.first_name.clone(),
        last_name: account.last_name.clone(),
        email: account.email.clone(),
        role: account.role.clone(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("JWT encode failed: {}", e)))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::InvalidJwt("Invalid or expired token".to_string()))
}
