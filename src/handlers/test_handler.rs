use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessJwt, AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::request::CreateTestResultRequest,
};

/// Mounts `/api/test`, guarded by the access-token verifier.
pub fn configure(jwt: AccessJwt) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api/test")
                .wrap(AuthMiddleware::new(jwt))
                .service(create_result)
                .service(list_results)
                .service(get_result),
        );
    }
}

#[post("/results")]
async fn create_result(
    state: web::Data<AppState>,
    request: web::Json<CreateTestResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .test_service
        .save_result(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/results")]
async fn list_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.test_service.list_results(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/results/{id}")]
async fn get_result(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state.test_service.get_result(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(result))
}
