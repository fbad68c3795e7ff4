//! Roster API service.
//!
//! Provides REST API endpoints for managing users.
//!
//! # Configuration
//!
//! The API requires a shared secret for verifying bearer tokens. See
//! [`config::ApiConfig`] for configuration options.
//!
//! # Authentication
//!
//! Every `/users` route requires an `Authorization: Bearer <jwt>` header.
//! See [`auth::providers::bearer`] for implementation details.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod server;

pub(crate) mod handlers;
pub(crate) mod json;
pub(crate) mod path;
