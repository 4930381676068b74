use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::SessionTokens,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
        response::MessageResponse,
    },
};

/// Mounts `/register`, `/login`, `/refresh` and `/logout`.
///
/// These are the only routes that see the refresh verifier; it is attached
/// to each resource rather than to the whole application.
pub fn configure(tokens: SessionTokens) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let tokens = web::Data::new(tokens);
        cfg.service(
            web::resource("/register")
                .app_data(tokens.clone())
                .route(web::post().to(register)),
        )
        .service(
            web::resource("/login")
                .app_data(tokens.clone())
                .route(web::post().to(login)),
        )
        .service(
            web::resource("/refresh")
                .app_data(tokens.clone())
                .route(web::post().to(refresh_token)),
        )
        .service(
            web::resource("/logout")
                .app_data(tokens)
                .route(web::post().to(logout)),
        );
    }
}

async fn register(
    state: web::Data<AppState>,
    tokens: web::Data<SessionTokens>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .register(request.into_inner(), &tokens)
        .await?;
    Ok(HttpResponse::Created().json(response))
}

async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<SessionTokens>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .login(request.into_inner(), &tokens)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn refresh_token(
    state: web::Data<AppState>,
    tokens: web::Data<SessionTokens>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .session_service
        .refresh(request.into_inner(), &tokens)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn logout(
    state: web::Data<AppState>,
    tokens: web::Data<SessionTokens>,
    request: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .session_service
        .logout(request.into_inner(), &tokens)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out")))
}
