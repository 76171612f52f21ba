//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Registra application,
//! following Clean Architecture principles. It provides concrete implementations
//! for database access and outgoing mail.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx
//! - **Mail**: mail delivery (mock console output, HTTP transactional API)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use reg_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail delivery module - External mail providers
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail service error: {0}")]
    Mail(String),
}

