use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::User;

/// Claim sets that can be signed by a [`JwtService`](crate::auth::JwtService).
///
/// `TOKEN_TYPE` is embedded in every token so a verifier rejects tokens of
/// another class even if it were ever configured with the same key.
pub trait TokenClaims: Serialize + DeserializeOwned + Clone {
    const TOKEN_TYPE: &'static str;

    fn token_type(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String, // user id
    pub username: String,
    pub lang: String,
    pub token_type: String,
    pub exp: usize,
    pub iat: usize,
}

impl AccessClaims {
    pub fn new(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        let exp = now + ttl;

        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            lang: user.lang.clone(),
            token_type: Self::TOKEN_TYPE.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

impl TokenClaims for AccessClaims {
    const TOKEN_TYPE: &'static str = "access";

    fn token_type(&self) -> &str {
        &self.token_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String, // user id
    pub jti: String, // makes every refresh token unique, even within one second
    pub token_type: String,
    pub exp: usize,
    pub iat: usize,
}

impl RefreshClaims {
    pub fn new(user_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let exp = now + ttl;

        Self {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: Self::TOKEN_TYPE.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

impl TokenClaims for RefreshClaims {
    const TOKEN_TYPE: &'static str = "refresh";

    fn token_type(&self) -> &str {
        &self.token_type
    }
}
