//! Profile handlers for the logged-in user

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::MailerTrait;

use crate::dto::account::{ProfileResponse, UpdateProfileRequest};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang, handle_validation_errors};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/profile
pub async fn get_profile<U, T, M>(
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

    match state.account_service.profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse::from(&user)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for PUT /api/v1/profile
///
/// Replaces both names; an omitted name is cleared.
pub async fn update_profile<U, T, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, M>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .update_profile(auth.user_id, &request.first_name, &request.last_name)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse::from(&user)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}
