//! Application factory
//!
//! Builds the Actix-web application from already constructed services so the
//! binary and the integration tests share the same routing table.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};
use std::sync::Arc;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::{AccessTokenVerifier, MailerTrait};
use reg_shared::CorsConfig;

use crate::dto::error::{ErrorResponse, ErrorResponseExt};
use crate::handlers::error::Language;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{
    auth::{login, logout},
    password::{change_password, confirm_password_reset, request_password_reset},
    profile::{get_profile, update_profile},
    registration::{activate, register},
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, M>(
    app_state: web::Data<AppState<U, T, M>>,
    verifier: Arc<dyn AccessTokenVerifier>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailerTrait + 'static,
{
    let cors = create_cors(cors_config);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/register")
                        .route("", web::post().to(register::<U, T, M>))
                        .route("/activate/{token}", web::get().to(activate::<U, T, M>)),
                )
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::<U, T, M>))
                        .route(
                            "/logout",
                            web::post().to(logout::<U, T, M>).wrap(JwtAuth::new()),
                        ),
                )
                .service(
                    web::scope("/password")
                        .route(
                            "/change",
                            web::post()
                                .to(change_password::<U, T, M>)
                                .wrap(JwtAuth::new()),
                        )
                        .route("/reset", web::post().to(request_password_reset::<U, T, M>))
                        .route(
                            "/reset/confirm",
                            web::post().to(confirm_password_reset::<U, T, M>),
                        ),
                )
                .service(
                    web::resource("/profile")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(get_profile::<U, T, M>))
                        .route(web::put().to(update_profile::<U, T, M>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed or missing JSON bodies get the same envelope as DTO validation failures
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let lang = Language::from_request(req);
    log::info!("Rejected JSON payload: {}", err);

    let mut details = std::collections::HashMap::new();
    details.insert("body".to_string(), serde_json::json!(err.to_string()));

    let response = ErrorResponse::new(
        "validation_error",
        lang.pick("Invalid request body", "请求体无效"),
    )
    .with_details(details)
    .to_response(actix_web::http::StatusCode::BAD_REQUEST);

    InternalError::from_response(err, response).into()
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "registra-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Registra API v1",
        "endpoints": {
            "health": "/health",
            "registration": {
                "register": {
                    "path": "/api/v1/register",
                    "method": "POST",
                    "description": "Create an inactive account and email its activation link",
                    "request_body": {
                        "email": "string (valid email, max 254 chars)",
                        "password": "string",
                        "password_confirmation": "string"
                    },
                    "responses": {
                        "201": "Account pending activation",
                        "400": "Invalid email or password",
                        "409": "Email already in use by an active account"
                    }
                },
                "activate": {
                    "path": "/api/v1/register/activate/{token}",
                    "method": "GET",
                    "description": "Activate an account from the emailed link",
                    "responses": {
                        "200": "Account activated",
                        "400": "Invalid, expired or already used link"
                    }
                }
            },
            "auth": {
                "login": {
                    "path": "/api/v1/auth/login",
                    "method": "POST",
                    "description": "Exchange email and password for an access token",
                    "responses": {
                        "200": "Access token issued",
                        "401": "Invalid credentials",
                        "403": "Account not activated"
                    }
                },
                "logout": {
                    "path": "/api/v1/auth/logout",
                    "method": "POST",
                    "description": "Revoke the current access token",
                    "requires_auth": true
                }
            },
            "password": {
                "change": {
                    "path": "/api/v1/password/change",
                    "method": "POST",
                    "requires_auth": true
                },
                "reset": {
                    "path": "/api/v1/password/reset",
                    "method": "POST",
                    "description": "Email a password reset link"
                },
                "reset_confirm": {
                    "path": "/api/v1/password/reset/confirm",
                    "method": "POST",
                    "description": "Set a new password with a reset token"
                }
            },
            "profile": {
                "path": "/api/v1/profile",
                "methods": ["GET", "PUT"],
                "requires_auth": true
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
