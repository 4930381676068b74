use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Any origin may call the API with credentials; the request origin is
/// mirrored back.
pub fn cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_origin, _req_head| true)
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
