//! Main registration service implementation

use std::sync::Arc;

use reg_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::user::User;
use crate::domain::value_objects::SiteContext;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::mail::{activation_email, MailerTrait};
use crate::services::password::{hash_password, validate_new_password};
use crate::services::signing::ActivationCodec;

use super::config::RegistrationServiceConfig;

/// Service driving the register and activate steps of the account lifecycle
pub struct RegistrationService<U, M>
where
    U: UserRepository,
    M: MailerTrait,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Mail delivery for activation links
    mailer: Arc<M>,
    /// Codec for activation tokens
    codec: ActivationCodec,
    /// Service configuration
    config: RegistrationServiceConfig,
}

impl<U, M> RegistrationService<U, M>
where
    U: UserRepository,
    M: MailerTrait,
{
    pub fn new(
        user_repository: Arc<U>,
        mailer: Arc<M>,
        codec: ActivationCodec,
        config: RegistrationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            mailer,
            codec,
            config,
        }
    }

    /// Register a new, inactive account and mail its activation link
    ///
    /// This method:
    /// 1. Validates the email and the password pair
    /// 2. Deletes inactive accounts registered with the same email
    /// 3. Fails with `EmailTaken` if an active account owns the email
    /// 4. Stores the new inactive account
    /// 5. Mails the activation link
    ///
    /// A failed delivery is logged and does not fail the registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
        site: &SiteContext,
    ) -> DomainResult<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        validate_new_password(password, password_confirmation, &email)?;

        let discarded = self.user_repository.delete_inactive_by_email(&email).await?;
        if discarded > 0 {
            tracing::info!(
                email = %mask_email(&email),
                discarded,
                "Discarded stale inactive registrations"
            );
        }

        if self
            .user_repository
            .find_active_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(password.to_string(), self.config.bcrypt_cost).await?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash))
            .await?;

        let token = self.codec.encode(user.id)?;
        self.send_activation_email(&user, &token, site).await;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            "User registered, awaiting activation"
        );

        Ok(user)
    }

    /// Activate the account identified by an activation token
    ///
    /// # Errors
    ///
    /// * `TokenError::SignatureInvalid` / `TokenError::SignatureExpired` - bad token
    /// * `AuthError::UserNotFound` - the account was deleted after the link was sent
    /// * `AuthError::AlreadyActive` - the link was already used
    ///
    /// Nothing is changed when an error is returned.
    pub async fn activate(&self, token: &str) -> DomainResult<User> {
        let user_id = self
            .codec
            .decode(token, self.config.activation_timeout_seconds)
            .map_err(|e| {
                tracing::info!(reason = %e, "Rejected activation token");
                DomainError::Token(e)
            })?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_active {
            return Err(AuthError::AlreadyActive.into());
        }

        user.activate();
        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, "User activated");
        Ok(user)
    }

    async fn send_activation_email(&self, user: &User, token: &str, site: &SiteContext) {
        let message = activation_email(site, &user.email, token);
        match self.mailer.send_mail(&message).await {
            Ok(message_id) => {
                tracing::debug!(user_id = %user.id, message_id = %message_id, "Activation email sent");
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    email = %mask_email(&user.email),
                    error = %e,
                    "Failed to send activation email"
                );
            }
        }
    }
}
