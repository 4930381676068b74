use std::marker::PhantomData;

use chrono::Duration;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{AccessClaims, RefreshClaims, TokenClaims},
    config::Config,
    errors::{AppError, AppResult},
};

pub const ACCESS_JWT_NAME: &str = "jwt";
pub const REFRESH_JWT_NAME: &str = "refreshJwt";

/// Signs and verifies one class of token with one secret.
///
/// Every token class gets its own instance, so adding a class (for example a
/// password-reset token) only needs a new [`TokenClaims`] type.
pub struct JwtService<C> {
    name: &'static str,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    _claims: PhantomData<fn() -> C>,
}

pub type AccessJwt = JwtService<AccessClaims>;
pub type RefreshJwt = JwtService<RefreshClaims>;

impl<C> Clone for JwtService<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            encoding_key: self.encoding_key.clone(),
            decoding_key: self.decoding_key.clone(),
            validation: self.validation.clone(),
            ttl: self.ttl,
            _claims: PhantomData,
        }
    }
}

impl<C: TokenClaims> JwtService<C> {
    pub fn new(name: &'static str, secret: &SecretString, ttl: Duration) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            name,
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            ttl,
            _claims: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign(&self, claims: &C) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            AppError::InternalError(format!("Failed to create {} token: {}", self.name, e))
        })
    }

    pub fn verify(&self, token: &str) -> AppResult<C> {
        let token_data = decode::<C>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized(format!("{} token has expired", C::TOKEN_TYPE))
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized(format!("{} token signature is invalid", C::TOKEN_TYPE))
                }
                ErrorKind::InvalidToken => {
                    AppError::Unauthorized(format!("Invalid {} token format", C::TOKEN_TYPE))
                }
                _ => AppError::Unauthorized(format!(
                    "{} token validation failed: {}",
                    C::TOKEN_TYPE,
                    e
                )),
            }
        })?;

        if token_data.claims.token_type() != C::TOKEN_TYPE {
            return Err(AppError::Unauthorized(format!(
                "Token is not a {} token",
                C::TOKEN_TYPE
            )));
        }

        Ok(token_data.claims)
    }
}

/// The two verifiers the auth route group needs: one per signing key.
#[derive(Clone)]
pub struct SessionTokens {
    pub access: AccessJwt,
    pub refresh: RefreshJwt,
}

impl SessionTokens {
    pub fn from_config(config: &Config) -> Self {
        Self {
            access: JwtService::new(
                ACCESS_JWT_NAME,
                &config.access_token_secret,
                Duration::minutes(config.access_token_ttl_minutes),
            ),
            refresh: JwtService::new(
                REFRESH_JWT_NAME,
                &config.refresh_token_secret,
                Duration::hours(config.refresh_token_ttl_hours),
            ),
        }
    }
}
