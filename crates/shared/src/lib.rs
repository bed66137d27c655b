//! Shared types, errors, and configuration for Gasto.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT authentication types and token service
//! - Input sanitization helpers
//! - Best-effort push notification gateway

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod push;
pub mod sanitize;

pub use auth::{Claims, TokenKind, TokenPair};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use push::{PushConfig, PushGateway};
