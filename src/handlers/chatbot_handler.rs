use actix_web::{post, web, HttpResponse, ResponseError};

use crate::{
    app_state::AppState,
    models::chat::{ChatApiResponse, ChatRequest},
};

/// Mounts `/api/chatbot`. Public: anonymous visitors may chat, and the
/// context carries an `auth` flag instead of a token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/chatbot").service(chat));
}

/// Failures keep the `{success, message}` envelope the chatbot client reads.
#[post("/chat")]
async fn chat(state: web::Data<AppState>, request: web::Json<ChatRequest>) -> HttpResponse {
    match state.chatbot_service.reply(request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(ChatApiResponse::ok(response)),
        Err(err) => {
            log::error!("Chatbot reply failed: {}", err);
            HttpResponse::build(err.status_code()).json(ChatApiResponse::failure(err.to_string()))
        }
    }
}
