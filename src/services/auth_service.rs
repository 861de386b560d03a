//! Token verification
//!
//! Tokens are issued by the platform's account service; this service only
//! checks them and extracts the user id.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify an HS256 token and return its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
