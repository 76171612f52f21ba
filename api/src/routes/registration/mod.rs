//! Registration route handlers

pub mod activate;
pub mod register;

pub use activate::activate;
pub use register::register;
