use std::sync::Arc;

use chrono::{TimeZone, Utc};
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, AccessClaims, RefreshClaims, SessionTokens},
    errors::{AppError, AppResult},
    models::{
        domain::{refresh_token::token_fingerprint, RefreshToken, User},
        dto::{
            request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
            response::AuthResponse,
        },
    },
    repositories::{RefreshTokenRepository, UserRepository},
};

/// Registration, login, refresh-token rotation and logout.
///
/// The signing keys are not owned here: every call receives the
/// [`SessionTokens`] the auth route group was constructed with.
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
        tokens: &SessionTokens,
    ) -> AppResult<AuthResponse> {
        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        let user = User::new(
            &request.username,
            &request.email,
            hash_password(&request.password)?,
        )
        .with_display_name(request.display_name)
        .with_lang(request.lang);

        let user = self.users.create(user).await?;
        log::info!("Registered user {}", user.username);

        self.issue_session(user, tokens).await
    }

    pub async fn login(
        &self,
        request: LoginRequest,
        tokens: &SessionTokens,
    ) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .filter(|user| verify_password(&request.password, &user.password_hash))
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        self.issue_session(user, tokens).await
    }

    /// Exchanges a refresh token for a new token pair and revokes the old one.
    pub async fn refresh(
        &self,
        request: RefreshTokenRequest,
        tokens: &SessionTokens,
    ) -> AppResult<AuthResponse> {
        request.validate()?;

        let claims = tokens.refresh.verify(&request.refresh_token)?;
        let token_hash = token_fingerprint(&request.refresh_token);

        let stored = self
            .refresh_tokens
            .find_by_token_hash(&token_hash)
            .await?
            .filter(RefreshToken::is_active)
            .ok_or_else(|| {
                AppError::Unauthorized("Refresh token has been revoked".to_string())
            })?;

        if stored.user_id != claims.sub {
            return Err(AppError::Unauthorized(
                "Refresh token does not belong to this user".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("User associated with refresh token not found".to_string())
            })?;

        // Only the request that revokes the token may mint the next pair.
        match self.refresh_tokens.revoke_by_token_hash(&token_hash).await {
            Ok(true) => {}
            Ok(false) | Err(AppError::NotFound(_)) => {
                log::warn!("Refresh token reuse rejected for user: {}", claims.sub);
                return Err(AppError::Unauthorized(
                    "Refresh token has already been used".to_string(),
                ));
            }
            Err(err) => return Err(err),
        }

        let response = self.issue_session(user, tokens).await?;
        log::info!("Token refreshed successfully for user: {}", claims.sub);
        Ok(response)
    }

    /// Revoking an already unknown token still succeeds.
    pub async fn logout(&self, request: LogoutRequest, tokens: &SessionTokens) -> AppResult<()> {
        request.validate()?;

        let claims = tokens.refresh.verify(&request.refresh_token)?;

        if request.all_devices {
            let revoked = self.refresh_tokens.revoke_all_for_user(&claims.sub).await?;
            log::info!("Revoked {} refresh tokens for user: {}", revoked, claims.sub);
            return Ok(());
        }

        match self
            .refresh_tokens
            .revoke_by_token_hash(&token_fingerprint(&request.refresh_token))
            .await
        {
            Ok(_) | Err(AppError::NotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn issue_session(&self, user: User, tokens: &SessionTokens) -> AppResult<AuthResponse> {
        let access_token = tokens
            .access
            .sign(&AccessClaims::new(&user, tokens.access.ttl()))?;

        let refresh_claims = RefreshClaims::new(&user.id, tokens.refresh.ttl());
        let refresh_token = tokens.refresh.sign(&refresh_claims)?;
        let expires_at = Utc
            .timestamp_opt(refresh_claims.exp as i64, 0)
            .single()
            .ok_or_else(|| AppError::InternalError("Invalid refresh token expiry".to_string()))?;

        self.refresh_tokens
            .create(RefreshToken::issue(&user.id, &refresh_token, expires_at))
            .await?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: tokens.access.ttl().num_seconds(),
            user: user.into(),
        })
    }
}
