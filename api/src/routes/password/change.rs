use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::account::ChangePasswordRequest;
use crate::dto::error::MessageResponse;
use crate::handlers::error::{extract_language, handle_domain_error_with_lang, handle_validation_errors};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/password/change
///
/// ## Errors
/// - 400 Bad Request: New password rejected
/// - 401 Unauthorized: Wrong old password or missing token
pub async fn change_password<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(
            auth.user_id,
            &request.old_password,
            &request.new_password,
            &request.new_password_confirmation,
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new(
            lang.pick("Password changed successfully", "密码修改成功"),
        )),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
