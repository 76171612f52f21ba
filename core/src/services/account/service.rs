//! Main account service implementation

use std::sync::Arc;
use uuid::Uuid;

use reg_shared::utils::validation::{mask_email, normalize_email};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, SiteContext};
use crate::errors::{AuthError, DomainResult, TokenError, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::mail::{password_reset_email, MailerTrait};
use crate::services::password::{hash_password, validate_new_password, verify_password};
use crate::services::session::SessionService;
use crate::services::signing::PasswordResetCodec;

use super::config::AccountServiceConfig;

/// Account service for authenticated and password-recovery operations
pub struct AccountService<U, T, M>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailerTrait,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Session service for JWT management
    session_service: Arc<SessionService<T>>,
    /// Mail delivery for reset links
    mailer: Arc<M>,
    /// Codec for password reset tokens
    reset_codec: PasswordResetCodec,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U, T, M> AccountService<U, T, M>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailerTrait,
{
    pub fn new(
        user_repository: Arc<U>,
        session_service: Arc<SessionService<T>>,
        mailer: Arc<M>,
        reset_codec: PasswordResetCodec,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_service,
            mailer,
            reset_codec,
            config,
        }
    }

    /// Authenticate with email and password and open a session
    ///
    /// An inactive account is only reported as such when the password is
    /// correct; every other failure is `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let candidates = self.user_repository.find_all_by_email(&email).await?;

        let (active, pending): (Vec<User>, Vec<User>) =
            candidates.into_iter().partition(|u| u.is_active);

        if let Some(mut user) = active.into_iter().next() {
            if !verify_password(password.to_string(), user.password_hash.clone()).await? {
                tracing::info!(email = %mask_email(&email), "Login failed: wrong password");
                return Err(AuthError::InvalidCredentials.into());
            }

            user.update_last_login();
            let user = self.user_repository.update(user).await?;
            let response = self.session_service.issue(&user)?;

            tracing::info!(user_id = %user.id, "User logged in");
            return Ok(response);
        }

        for user in pending {
            if verify_password(password.to_string(), user.password_hash.clone()).await? {
                tracing::info!(user_id = %user.id, "Login refused: account not activated");
                return Err(AuthError::AccountInactive.into());
            }
        }

        tracing::info!(email = %mask_email(&email), "Login failed: unknown account");
        Err(AuthError::InvalidCredentials.into())
    }

    /// Close the session the claims were taken from
    pub async fn logout(&self, claims: &Claims) -> DomainResult<()> {
        self.session_service.revoke(claims).await?;
        tracing::info!(user_id = %claims.sub, "User logged out");
        Ok(())
    }

    /// Change the password of a logged-in user
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
        new_password_confirmation: &str,
    ) -> DomainResult<User> {
        let mut user = self.find_user(user_id).await?;

        if !verify_password(old_password.to_string(), user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials.into());
        }
        validate_new_password(new_password, new_password_confirmation, &user.email)?;

        let password_hash = hash_password(new_password.to_string(), self.config.bcrypt_cost).await?;
        user.set_password_hash(password_hash);
        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(user)
    }

    /// Mail a password reset link when an active account owns `email`
    ///
    /// Returns `Ok(())` whether or not such an account exists.
    pub async fn request_password_reset(&self, email: &str, site: &SiteContext) -> DomainResult<()> {
        let email = normalize_email(email);
        let Some(user) = self.user_repository.find_active_by_email(&email).await? else {
            tracing::debug!(email = %mask_email(&email), "Password reset requested for unknown account");
            return Ok(());
        };

        let token = self.reset_codec.encode(&user)?;
        let message = password_reset_email(site, &user.email, &token);
        match self.mailer.send_mail(&message).await {
            Ok(message_id) => {
                tracing::info!(user_id = %user.id, message_id = %message_id, "Password reset email sent");
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to send password reset email");
            }
        }

        Ok(())
    }

    /// Set a new password using an emailed reset token
    ///
    /// The token is void once the password has changed.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
        new_password_confirmation: &str,
    ) -> DomainResult<User> {
        let claims = self
            .reset_codec
            .decode(token, self.config.password_reset_timeout_seconds)?;

        let mut user = self
            .user_repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or(TokenError::SignatureInvalid)?;

        if !claims.matches(&user) {
            return Err(TokenError::SignatureInvalid.into());
        }
        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }
        validate_new_password(new_password, new_password_confirmation, &user.email)?;

        let password_hash = hash_password(new_password.to_string(), self.config.bcrypt_cost).await?;
        user.set_password_hash(password_hash);
        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(user)
    }

    /// Current profile of a user
    pub async fn profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.find_user(user_id).await
    }

    /// Replace the profile names of a user
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> DomainResult<User> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        self.check_name_length("first_name", first_name)?;
        self.check_name_length("last_name", last_name)?;

        let mut user = self.find_user(user_id).await?;
        user.set_names(first_name.to_string(), last_name.to_string());
        self.user_repository.update(user).await
    }

    async fn find_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    fn check_name_length(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        if value.chars().count() > self.config.max_name_length {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: self.config.max_name_length,
            });
        }
        Ok(())
    }
}
