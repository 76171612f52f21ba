use actix_web::{rt, web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use reg_api::app::create_app;
use reg_api::routes::AppState;
use reg_core::domain::value_objects::SiteContext;
use reg_core::repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, TokenRepository, UserRepository,
};
use reg_core::services::{
    AccessTokenVerifier, AccountService, AccountServiceConfig, ActivationCodec, MailerTrait,
    PasswordResetCodec, RegistrationService, RegistrationServiceConfig, SessionService,
};
use reg_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use reg_infra::mail::create_mailer;
use reg_shared::AppConfig;

/// How often revoked access tokens past their expiry are purged
const REVOCATION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // The log filter depends on the environment, so configuration comes first
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::from_env(), Some(e)),
    };

    // Initialize logger; RUST_LOG still takes precedence
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting Registra API Server ({})", config.environment);
    if let Some(e) = load_error {
        warn!("Failed to load configuration file ({}), using environment only", e);
    }
    for warning in config.security_warnings() {
        warn!("{}", warning);
    }

    let mailer = Arc::new(create_mailer(&config.mail));
    info!("Mail provider: {}", mailer.provider_name());

    if std::env::var("DATABASE_URL").is_ok() {
        let pool = DatabasePool::new(config.database.clone())
            .await
            .context("failed to connect to the database")?;
        pool.run_migrations()
            .await
            .context("failed to run database migrations")?;

        let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
        let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
        serve(config, users, tokens, mailer).await
    } else {
        warn!("DATABASE_URL is not set; accounts are kept in memory and lost on restart");
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        serve(config, users, tokens, mailer).await
    }
}

/// Wire the services over the given storage and run the HTTP server
async fn serve<U, T, M>(
    config: AppConfig,
    users: Arc<U>,
    tokens: Arc<T>,
    mailer: Arc<M>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailerTrait + 'static,
{
    let secret = config.registration.secret_key.as_str();

    let session_service = Arc::new(SessionService::new(tokens.clone(), config.auth.jwt.clone()));
    let registration_service = Arc::new(RegistrationService::new(
        users.clone(),
        mailer.clone(),
        ActivationCodec::new(secret),
        RegistrationServiceConfig::from_app(&config.registration, &config.auth),
    ));
    let account_service = Arc::new(AccountService::new(
        users,
        session_service.clone(),
        mailer,
        PasswordResetCodec::new(secret),
        AccountServiceConfig::from_app(&config.registration, &config.auth),
    ));

    let app_state = web::Data::new(AppState {
        registration_service,
        account_service,
        site: SiteContext::from(&config.registration),
    });
    let verifier: Arc<dyn AccessTokenVerifier> = session_service;

    rt::spawn(purge_revoked_tokens(tokens));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), verifier.clone(), &cors))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

/// Periodically drop revocation entries whose tokens have expired anyway
async fn purge_revoked_tokens<T: TokenRepository>(tokens: Arc<T>) {
    let mut interval = rt::time::interval(REVOCATION_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        match tokens.purge_expired().await {
            Ok(0) => {}
            Ok(purged) => info!("Purged {} expired token revocations", purged),
            Err(e) => warn!("Failed to purge expired token revocations: {}", e),
        }
    }
}
