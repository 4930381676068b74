use std::io;

use actix_web::{middleware::Logger, App, HttpServer};
use env_logger::Env;

use job_quiz_server::{
    app_state::AppState, auth::SessionTokens, config::Config, cors::cors,
    middleware::RequestIdMiddleware, server,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let tokens = SessionTokens::from_config(&config);
    let state = AppState::new(&config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("Health check: http://{}:{}/health", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(server::configure(state.clone(), tokens.clone()))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
