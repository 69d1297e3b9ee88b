//! HTTP handlers.

pub mod billing_handler;
pub mod credential_handler;
pub mod health_handler;
pub mod route_handler;

pub use billing_handler::billing_routes;
pub use credential_handler::credential_routes;
pub use health_handler::health_routes;
pub use route_handler::{dispatch, RouteHandler};
