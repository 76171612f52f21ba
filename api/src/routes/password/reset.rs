use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::account::{PasswordResetConfirmRequest, PasswordResetRequest};
use crate::dto::error::MessageResponse;
use crate::handlers::error::{
    extract_language, handle_domain_error_with_lang, handle_terminal_error_with_lang,
    handle_validation_errors,
};
use crate::routes::AppState;

/// Handler for POST /api/v1/password/reset
///
/// Mails a reset link when an active account owns the email. The response
/// is the same whether or not it does.
pub async fn request_password_reset<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    request: web::Json<PasswordResetRequest>,
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
        .request_password_reset(&request.email, &state.site)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(lang.pick(
            "If an active account uses this email, a password reset link has been sent",
            "如果该邮箱对应已激活的账户，重置密码链接已发送",
        ))),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for POST /api/v1/password/reset/confirm
///
/// ## Errors
/// - 400 Bad Request: Invalid, expired or already used token, or a rejected
///   new password
pub async fn confirm_password_reset<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    request: web::Json<PasswordResetConfirmRequest>,
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
        .confirm_password_reset(
            &request.token,
            &request.new_password,
            &request.new_password_confirmation,
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new(lang.pick(
            "Your password has been set. You may log in now.",
            "密码已重置，现在可以登录。",
        ))),
        Err(error) => handle_terminal_error_with_lang(&error, lang),
    }
}
