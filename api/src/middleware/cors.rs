//! CORS middleware configuration for cross-origin requests.
//!
//! Development configurations allow any origin; otherwise only the origins
//! listed in `ALLOWED_ORIGINS` are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use reg_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}
