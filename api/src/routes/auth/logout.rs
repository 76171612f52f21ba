use actix_web::{web, HttpRequest, HttpResponse};

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::error::MessageResponse;
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the access token used for this request.
/// Requires authentication via Bearer token in Authorization header.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or already revoked access token
pub async fn logout<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailerTrait + 'static,
{
    let lang = extract_language(&req);

    match state.account_service.logout(&auth.claims).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            lang.pick("Logged out successfully", "登出成功"),
        )),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
