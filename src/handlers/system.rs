use actix_web::{get, web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::app_state::AppState;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "online",
        "message": "Job Quiz API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": timestamp(),
        "endpoints": {
            "health": "/health",
            "auth": "/login, /register, /refresh, /logout",
            "test": "/api/test",
            "user": "/api/user",
            "questions": "/api/questions",
            "chatbot": "/api/chatbot"
        }
    }))
}

/// Pings the database on every call.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.db_health.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "timestamp": timestamp(),
            "database": "connected",
            "uptime": state.uptime_secs()
        })),
        Err(err) => {
            log::error!("Health check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "error",
                "timestamp": timestamp(),
                "database": "disconnected",
                "uptime": state.uptime_secs(),
                "error": err.to_string()
            }))
        }
    }
}
