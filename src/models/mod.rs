//! Request-scoped models: configuration and the signed-in user.

pub mod auth;
pub mod config;
