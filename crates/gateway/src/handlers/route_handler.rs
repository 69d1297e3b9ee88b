//! Route handler contract.
//!
//! Handlers that read route parameters implement [`RouteHandler`]; the Axum
//! function wired into the router calls [`dispatch`] with the extracted
//! [`RouteContext`].

use async_trait::async_trait;
use axum::response::Response;

use common::{resolve_params, AppResult, RouteContext, RouteParams};

use crate::state::AppState;

/// Business handler behind a parameterised route.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn handle(&self, state: AppState, params: RouteParams) -> AppResult<Response>;
}

/// Resolve the route context, then run the handler.
///
/// A failure from a pending parameter computation is returned as is and the
/// handler is not invoked.
pub async fn dispatch<H>(handler: &H, state: AppState, context: RouteContext) -> AppResult<Response>
where
    H: RouteHandler + ?Sized,
{
    let params = resolve_params(context).await?;
    handler.handle(state, params).await
}
