use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessJwt, AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::request::UpdateProfileRequest,
};

/// Mounts `/api/user`, guarded by the access-token verifier.
pub fn configure(jwt: AccessJwt) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api/user")
                .wrap(AuthMiddleware::new(jwt))
                .service(get_profile)
                .service(update_profile),
        );
    }
}

#[get("/me")]
async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_profile(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/me")]
async fn update_profile(
    state: web::Data<AppState>,
    request: web::Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .user_service
        .update_profile(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
