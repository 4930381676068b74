use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::QuestionQuery};

/// Mounts `/api/questions`. Question content is public; no verifier is used.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/questions")
            .service(list_questions)
            .service(get_question),
    );
}

#[get("")]
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionQuery>,
) -> Result<HttpResponse, AppError> {
    let questions = state.question_service.list_questions(&query).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/{id}")]
async fn get_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question = state.question_service.get_question(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}
