use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{
    app_state::AppState,
    auth::SessionTokens,
    errors::AppError,
    handlers::{
        auth_handler, chatbot_handler, health, question_handler, root, test_handler,
        user_handler,
    },
};

/// Registers shared state and every route group.
///
/// Each group receives the verifier it needs; nothing is looked up from a
/// global.
pub fn configure(state: AppState, tokens: SessionTokens) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let access = tokens.access.clone();

        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(root)
            .service(health)
            .configure(auth_handler::configure(tokens))
            .configure(test_handler::configure(access.clone()))
            .configure(user_handler::configure(access))
            .configure(question_handler::configure)
            .configure(chatbot_handler::configure);
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
}
