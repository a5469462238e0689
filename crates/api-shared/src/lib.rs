//! # API Shared
//!
//! Shared definitions for the ArtWeb APIs.
//!
//! Contains:
//! - Request and response bodies (`dto` module), with their OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for everything that is not HTTP plumbing.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
