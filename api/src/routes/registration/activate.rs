use actix_web::{web, HttpRequest, HttpResponse};

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::registration::ActivationResponse;
use crate::handlers::error::{extract_language, handle_terminal_error_with_lang, Language};
use crate::routes::AppState;

/// Handler for GET /api/v1/register/activate/{token}
///
/// The target of the emailed activation link.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user_id": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "user@example.com",
///     "is_active": true,
///     "activated_at": "2025-08-14T10:00:00Z",
///     "message": "Your account is now active. You may log in."
/// }
/// ```
///
/// ## Errors
/// 400 Bad Request for every failure of the link itself: `signature_invalid`,
/// `signature_expired`, `user_not_found` and `already_active`. None of them
/// is worth retrying.
pub async fn activate<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    token: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailerTrait + 'static,
{
    let lang = extract_language(&req);

    match state.registration_service.activate(&token).await {
        Ok(user) => {
            let mut response = ActivationResponse::from(&user);
            if lang == Language::Chinese {
                response.message = "账户已激活，现在可以登录。".to_string();
            }
            HttpResponse::Ok().json(response)
        }
        Err(error) => handle_terminal_error_with_lang(&error, lang),
    }
}
