//! Route context adapter.
//!
//! Route parameters reach handlers either already resolved (Axum path
//! extraction) or as a deferred computation. Handlers take a [`RouteContext`]
//! and call [`resolve_params`] once; both shapes go through the same code path.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
};
use futures::future::{BoxFuture, FutureExt};

use crate::error::{AppError, AppResult};

/// Resolved route parameters keyed by capture name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get a parameter that the route is expected to capture.
    pub fn require(&self, key: &str) -> AppResult<&str> {
        self.get(key)
            .ok_or_else(|| AppError::bad_request(format!("missing route parameter `{}`", key)))
    }

    /// Parse a required parameter into `T`.
    pub fn parse<T: FromStr>(&self, key: &str) -> AppResult<T> {
        let raw = self.require(key)?;
        raw.parse()
            .map_err(|_| AppError::bad_request(format!("route parameter `{}` is malformed", key)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for RouteParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Route parameters as delivered by the framework.
pub enum Params<E = AppError> {
    /// Available immediately
    Resolved(RouteParams),
    /// Delivered later; its failure is handed to the caller untouched
    Pending(BoxFuture<'static, Result<RouteParams, E>>),
}

impl<E> Params<E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Params::Pending(_))
    }
}

impl<E> fmt::Debug for Params<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Params::Resolved(params) => f.debug_tuple("Resolved").field(params).finish(),
            Params::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Per-request context handed to route handlers.
#[derive(Debug)]
pub struct RouteContext<E = AppError> {
    pub params: Params<E>,
}

impl<E> RouteContext<E> {
    pub fn resolved(params: impl Into<RouteParams>) -> Self {
        Self {
            params: Params::Resolved(params.into()),
        }
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<RouteParams, E>> + Send + 'static,
    {
        Self {
            params: Params::Pending(future.boxed()),
        }
    }

    pub async fn resolve(self) -> Result<RouteParams, E> {
        resolve_params(self).await
    }
}

/// Normalise either parameter shape into the resolved bag.
///
/// A resolved context completes on first poll. A pending one suspends the
/// caller until its future finishes; no timeout or retry is applied here.
pub async fn resolve_params<E>(context: RouteContext<E>) -> Result<RouteParams, E> {
    match context.params {
        Params::Resolved(params) => Ok(params),
        Params::Pending(future) => future.await,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RouteContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(params)) => Ok(Self::resolved(params)),
            // Routes without captures still get a context
            Err(PathRejection::MissingPathParams(_)) => Ok(Self::resolved(RouteParams::new())),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}
