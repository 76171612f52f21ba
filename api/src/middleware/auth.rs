//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! verifies it through the `AccessTokenVerifier` registered as app data and
//! injects an `AuthContext` into the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::{header::AUTHORIZATION, StatusCode},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use reg_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    services::AccessTokenVerifier,
};

use crate::handlers::error::{domain_error_parts, Language};

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Email the session was opened with
    pub email: String,
    /// Verified claims, needed to revoke the session on logout
    pub claims: Claims,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidAccessToken))?;
        Ok(Self {
            user_id,
            email: claims.email.clone(),
            claims,
        })
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let lang = Language::from_request(req.request());

            let Some(token) = extract_bearer_token(&req) else {
                let response =
                    unauthorized(&DomainError::Token(TokenError::InvalidAccessToken), lang);
                return Ok(req.into_response(response).map_into_right_body());
            };

            let Some(verifier) = req
                .app_data::<web::Data<Arc<dyn AccessTokenVerifier>>>()
                .cloned()
            else {
                log::error!("No access token verifier registered");
                let error = DomainError::Internal {
                    message: "JWT verification not configured".to_string(),
                };
                let response = unauthorized(&error, lang);
                return Ok(req.into_response(response).map_into_right_body());
            };

            let auth_context = match verifier
                .verify_access_token(&token)
                .await
                .and_then(AuthContext::from_claims)
            {
                Ok(context) => context,
                Err(e) => {
                    log::debug!("Rejected bearer token: {}", e);
                    let response = unauthorized(&e, lang);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(auth_context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// 401 with a JSON body; server errors keep their own status
fn unauthorized(error: &DomainError, lang: Language) -> HttpResponse {
    let (status, body) = domain_error_parts(error, lang);
    let status = if status.is_server_error() {
        status
    } else {
        StatusCode::UNAUTHORIZED
    };
    HttpResponse::build(status).json(&body)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
