//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Configuration structures
//! - Tracing initialisation
//! - The route context adapter

pub mod config;
pub mod error;
pub mod route;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use route::{resolve_params, Params, RouteContext, RouteParams};
