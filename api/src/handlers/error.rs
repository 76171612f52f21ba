//! Conversion of domain and request errors into JSON HTTP responses
//!
//! Every error body is an `ErrorResponse` with a stable `error` code and a
//! message in the language preferred by the client.

use actix_web::{
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::collections::HashMap;
use validator::ValidationErrors;

use reg_core::errors::{AuthError, DomainError, TokenError, ValidationError};

use crate::dto::error::{ErrorResponse, ErrorResponseExt};

/// Language preference for error messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Detect language preference from Accept-Language header
    ///
    /// Example header: `zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7`
    pub fn from_request(req: &HttpRequest) -> Self {
        let Some(header_str) = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
        else {
            return Language::English;
        };

        let mut preferred_lang = Language::English;
        let mut max_quality = 0.0;

        for entry in header_str.split(',') {
            let mut parts = entry.trim().split(';');
            let language = parts.next().unwrap_or_default().to_lowercase();
            let quality = parts
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            if language.starts_with("zh") && quality > max_quality {
                preferred_lang = Language::Chinese;
                max_quality = quality;
            } else if language.starts_with("en") && quality > max_quality {
                preferred_lang = Language::English;
                max_quality = quality;
            }
        }

        preferred_lang
    }

    /// Pick the message matching this language
    pub fn pick(self, en: &str, zh: &str) -> String {
        match self {
            Language::English => en.to_string(),
            Language::Chinese => zh.to_string(),
        }
    }
}

/// Extract the language preference from a request
pub fn extract_language(req: &HttpRequest) -> Language {
    Language::from_request(req)
}

/// Status code and body for a domain error
pub fn domain_error_parts(error: &DomainError, lang: Language) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::Auth(auth_error) => auth_error_parts(auth_error, lang),
        DomainError::Token(token_error) => token_error_parts(token_error, lang),
        DomainError::ValidationErr(validation_error) => {
            validation_error_parts(validation_error, lang)
        }
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                "validation_error",
                lang.pick(message, &format!("验证失败：{}", message)),
            ),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(
                "not_found",
                lang.pick(
                    &format!("{} not found", resource),
                    &format!("未找到{}", resource),
                ),
            ),
        ),
        DomainError::Database(_) | DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(
                "internal_error",
                lang.pick("An internal error occurred", "发生内部错误"),
            ),
        ),
    }
}

fn auth_error_parts(error: &AuthError, lang: Language) -> (StatusCode, ErrorResponse) {
    let (status, en, zh) = match error {
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "User not found", "用户不存在"),
        AuthError::AlreadyActive => (
            StatusCode::BAD_REQUEST,
            "This account has already been activated",
            "该账户已激活",
        ),
        AuthError::EmailTaken => (
            StatusCode::CONFLICT,
            "A user with that email address already exists",
            "该邮箱已被注册",
        ),
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "Please enter a correct email and password",
            "邮箱或密码不正确",
        ),
        AuthError::AccountInactive => (
            StatusCode::FORBIDDEN,
            "This account has not been activated yet",
            "该账户尚未激活",
        ),
    };
    (status, ErrorResponse::new(error.code(), lang.pick(en, zh)))
}

fn token_error_parts(error: &TokenError, lang: Language) -> (StatusCode, ErrorResponse) {
    let (status, en, zh) = match error {
        TokenError::SignatureInvalid => (
            StatusCode::BAD_REQUEST,
            "The link is invalid",
            "链接无效",
        ),
        TokenError::SignatureExpired => (
            StatusCode::BAD_REQUEST,
            "The link has expired",
            "链接已过期",
        ),
        TokenError::AccessTokenExpired => (
            StatusCode::UNAUTHORIZED,
            "Token has expired",
            "令牌已过期",
        ),
        TokenError::InvalidAccessToken => (
            StatusCode::UNAUTHORIZED,
            "Invalid token",
            "令牌无效",
        ),
        TokenError::TokenRevoked => (
            StatusCode::UNAUTHORIZED,
            "Token has been revoked",
            "令牌已被撤销",
        ),
        TokenError::TokenGenerationFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate token",
            "令牌生成失败",
        ),
    };
    (status, ErrorResponse::new(error.code(), lang.pick(en, zh)))
}

fn validation_error_parts(error: &ValidationError, lang: Language) -> (StatusCode, ErrorResponse) {
    let (field, message) = match error {
        ValidationError::RequiredField { field } => (
            field.clone(),
            lang.pick(
                &format!("This field is required: {}", field),
                &format!("必填字段：{}", field),
            ),
        ),
        ValidationError::InvalidEmail => (
            "email".to_string(),
            lang.pick("Enter a valid email address", "请输入有效的邮箱地址"),
        ),
        ValidationError::TooLong { field, max } => (
            field.clone(),
            lang.pick(
                &format!("Ensure {} has at most {} characters", field, max),
                &format!("{}最多{}个字符", field, max),
            ),
        ),
        ValidationError::PasswordMismatch => (
            "password_confirmation".to_string(),
            lang.pick("The two password fields didn't match", "两次输入的密码不一致"),
        ),
        ValidationError::PasswordTooShort { min } => (
            "password".to_string(),
            lang.pick(
                &format!("This password is too short. It must contain at least {} characters", min),
                &format!("密码太短，至少需要{}个字符", min),
            ),
        ),
        ValidationError::PasswordEntirelyNumeric => (
            "password".to_string(),
            lang.pick("This password is entirely numeric", "密码不能全部为数字"),
        ),
        ValidationError::PasswordTooCommon => (
            "password".to_string(),
            lang.pick("This password is too common", "密码过于常见"),
        ),
        ValidationError::PasswordTooSimilar => (
            "password".to_string(),
            lang.pick(
                "The password is too similar to the email address",
                "密码与邮箱地址过于相似",
            ),
        ),
    };

    let mut details = HashMap::new();
    details.insert("field".to_string(), json!(field));
    details.insert("code".to_string(), json!(error.code()));

    (
        StatusCode::BAD_REQUEST,
        ErrorResponse::new("validation_error", message).with_details(details),
    )
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: &DomainError, lang: Language) -> HttpResponse {
    let (status, body) = domain_error_parts(error, lang);
    log_error(error, status);
    body.to_response(status)
}

/// Respond with 400 to every client error and keep server errors as they are
pub fn handle_terminal_error_with_lang(error: &DomainError, lang: Language) -> HttpResponse {
    let (mut status, body) = domain_error_parts(error, lang);
    if error.is_client_error() {
        status = StatusCode::BAD_REQUEST;
    }
    log_error(error, status);
    body.to_response(status)
}

/// Convert request DTO validation failures into a 400 response with per-field details
pub fn handle_validation_errors(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), json!(codes));
    }

    log::info!("Request validation failed: {:?}", details.keys().collect::<Vec<_>>());

    ErrorResponse::new(
        "validation_error",
        lang.pick("Invalid request data", "请求数据无效"),
    )
    .with_details(details)
    .to_response(StatusCode::BAD_REQUEST)
}

fn log_error(error: &DomainError, status: StatusCode) {
    if status.is_server_error() {
        log::error!("Domain error ({}): {:?}", status.as_u16(), error);
    } else {
        log::info!("Request rejected ({}): {}", status.as_u16(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_language_detection() {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9,en;q=0.8"))
            .to_http_request();
        assert_eq!(Language::from_request(&req), Language::Chinese);

        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "zh;q=0.5,en-US;q=0.9"))
            .to_http_request();
        assert_eq!(Language::from_request(&req), Language::English);

        let req = TestRequest::default().to_http_request();
        assert_eq!(Language::from_request(&req), Language::English);
    }

    #[test]
    fn test_activation_errors_are_bad_request() {
        let errors = [
            DomainError::Token(TokenError::SignatureInvalid),
            DomainError::Token(TokenError::SignatureExpired),
            DomainError::Auth(AuthError::UserNotFound),
            DomainError::Auth(AuthError::AlreadyActive),
        ];
        for error in errors {
            let response = handle_terminal_error_with_lang(&error, Language::English);
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", error);
        }
    }

    #[test]
    fn test_server_errors_stay_server_errors() {
        let error = DomainError::Database("connection reset".to_string());
        let response = handle_terminal_error_with_lang(&error, Language::English);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Auth(AuthError::EmailTaken), StatusCode::CONFLICT),
            (DomainError::Auth(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::Auth(AuthError::AccountInactive), StatusCode::FORBIDDEN),
            (DomainError::Token(TokenError::TokenRevoked), StatusCode::UNAUTHORIZED),
            (
                DomainError::ValidationErr(ValidationError::PasswordTooCommon),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (error, expected) in cases {
            let (status, _) = domain_error_parts(&error, Language::English);
            assert_eq!(status, expected, "{:?}", error);
        }
    }

    #[test]
    fn test_validation_error_details() {
        let (_, body) = domain_error_parts(
            &DomainError::ValidationErr(ValidationError::PasswordMismatch),
            Language::Chinese,
        );
        assert_eq!(body.error, "validation_error");
        assert_eq!(body.message, "两次输入的密码不一致");
        let details = body.details.unwrap();
        assert_eq!(details["field"], "password_confirmation");
        assert_eq!(details["code"], "password_mismatch");
    }
}
