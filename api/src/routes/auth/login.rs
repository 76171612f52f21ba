use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::account::LoginRequest;
use crate::handlers::error::{extract_language, handle_domain_error_with_lang, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 3600,
///     "user_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password
/// - 403 Forbidden: Correct password but the account was never activated
pub async fn login<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailerTrait + 'static,
{
    let lang = extract_language(&req);

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
