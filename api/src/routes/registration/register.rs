use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;
use reg_shared::utils::validation::mask_email;

use crate::dto::registration::{RegisterRequest, RegisterResponse};
use crate::handlers::error::{
    extract_language, handle_domain_error_with_lang, handle_validation_errors, Language,
};
use crate::routes::AppState;

/// Handler for POST /api/v1/register
///
/// Creates an inactive account and mails its activation link.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "s3cret-pass",
///     "password_confirmation": "s3cret-pass"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user_id": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "user@example.com",
///     "status": "pending_activation",
///     "message": "An activation link has been sent to user@example.com. ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password
/// - 409 Conflict: An active account already uses the email
pub async fn register<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    request: web::Json<RegisterRequest>,
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

    log::info!("Registration requested for {}", mask_email(&request.email));

    match state
        .registration_service
        .register(
            &request.email,
            &request.password,
            &request.password_confirmation,
            &state.site,
        )
        .await
    {
        Ok(user) => {
            let mut response = RegisterResponse::pending(&user);
            if lang == Language::Chinese {
                response.message = format!("激活链接已发送至 {}，请点击链接完成激活。", user.email);
            }
            HttpResponse::Created().json(response)
        }
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
