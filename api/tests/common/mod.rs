//! Shared fixtures for API integration tests
#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use reg_api::routes::AppState;
use reg_core::domain::value_objects::{SiteContext, ACTIVATION_PATH, PASSWORD_RESET_PATH};
use reg_core::repositories::{InMemoryTokenRepository, InMemoryUserRepository};
use reg_core::services::{
    AccessTokenVerifier, AccountService, AccountServiceConfig, ActivationCodec, FixedClock,
    PasswordResetCodec, RegistrationService, RegistrationServiceConfig, SessionService,
};
use reg_infra::mail::{MailServiceAdapter, MockMailService};
use reg_shared::{CorsConfig, JwtConfig};

pub const SECRET_KEY: &str = "integration-test-secret-key";
pub const JWT_SECRET: &str = "integration-test-jwt-secret";
pub const ACTIVATION_TIMEOUT: u64 = 86_400;
pub const PASSWORD: &str = "Correct-Horse-42";

pub type TestState = AppState<InMemoryUserRepository, InMemoryTokenRepository, MailServiceAdapter>;

/// Services over in-memory storage with an inspectable outbox and a fixed clock
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub verifier: Arc<dyn AccessTokenVerifier>,
    pub cors: CorsConfig,
    pub mail: MockMailService,
    pub users: Arc<InMemoryUserRepository>,
    pub clock: Arc<FixedClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let mail = MockMailService::with_options(false, false);
        let mailer = Arc::new(MailServiceAdapter::new(Arc::new(mail.clone())));
        let clock = Arc::new(FixedClock::new(Utc::now()));

        let session_service = Arc::new(SessionService::new(
            tokens,
            JwtConfig::new(JWT_SECRET),
        ));
        let registration_service = Arc::new(RegistrationService::new(
            users.clone(),
            mailer.clone(),
            ActivationCodec::with_clock(SECRET_KEY, clock.clone()),
            RegistrationServiceConfig {
                activation_timeout_seconds: ACTIVATION_TIMEOUT,
                bcrypt_cost: 4,
            },
        ));
        let account_service = Arc::new(AccountService::new(
            users.clone(),
            session_service.clone(),
            mailer,
            PasswordResetCodec::with_clock(SECRET_KEY, clock.clone()),
            AccountServiceConfig {
                bcrypt_cost: 4,
                ..Default::default()
            },
        ));

        let state = web::Data::new(AppState {
            registration_service,
            account_service,
            site: SiteContext::new("https", "accounts.example.com"),
        });

        Self {
            state,
            verifier: session_service,
            cors: CorsConfig::development(),
            mail,
            users,
            clock,
        }
    }

    /// Token from the newest activation mail sent to `email`
    pub fn activation_token(&self, email: &str) -> String {
        self.token_from_mail(email, ACTIVATION_PATH)
    }

    /// Token from the newest password reset mail sent to `email`
    pub fn reset_token(&self, email: &str) -> String {
        self.token_from_mail(email, PASSWORD_RESET_PATH)
    }

    fn token_from_mail(&self, email: &str, path: &str) -> String {
        let message = self
            .mail
            .last_message_to(email)
            .unwrap_or_else(|| panic!("no mail sent to {}", email));
        let marker = format!("{}/", path);
        message
            .body
            .lines()
            .find_map(|line| line.split_once(&marker).map(|(_, token)| token.trim().to_string()))
            .unwrap_or_else(|| panic!("no {} link in mail", path))
    }
}

/// Call the service and decode the JSON body
pub async fn call_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

pub fn register_body(email: &str) -> Value {
    serde_json::json!({
        "email": email,
        "password": PASSWORD,
        "password_confirmation": PASSWORD,
    })
}
