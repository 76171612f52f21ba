//! HTTP route handlers grouped by feature
//!
//! - `registration` - sign up and activation links
//! - `auth` - login and logout
//! - `password` - password change and reset
//! - `profile` - the logged-in user's profile

pub mod auth;
pub mod password;
pub mod profile;
pub mod registration;

use std::sync::Arc;

use reg_core::domain::value_objects::SiteContext;
use reg_core::repositories::{TokenRepository, UserRepository};
use reg_core::services::{AccountService, MailerTrait, RegistrationService};

/// Application state that holds shared services
pub struct AppState<U, T, M>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailerTrait,
{
    pub registration_service: Arc<RegistrationService<U, M>>,
    pub account_service: Arc<AccountService<U, T, M>>,
    /// Protocol and domain used in emailed links
    pub site: SiteContext,
}
