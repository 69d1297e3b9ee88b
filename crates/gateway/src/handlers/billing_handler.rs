//! Billing display handlers.

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use common::{AppResult, RouteContext, RouteParams};
use domain::{format_currency, Currency, Locale, Money};

use crate::handlers::route_handler::{dispatch, RouteHandler};
use crate::state::AppState;

/// Query string for the format endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormatQuery {
    /// BCP 47 tag; `en-US` when absent
    #[param(example = "de-DE")]
    pub locale: Option<String>,
}

/// A formatted amount.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormatResponse {
    #[schema(example = "1.234,56\u{a0}€")]
    pub formatted: String,
    #[schema(example = "EUR")]
    pub currency: String,
    #[schema(example = 123456)]
    pub minor: i64,
    #[schema(example = "de-DE")]
    pub locale: String,
}

/// Create billing routes.
pub fn billing_routes() -> Router<AppState> {
    Router::new().route("/:currency/:minor/format", get(format_amount))
}

/// Format an amount given in minor units for display.
#[utoipa::path(
    get,
    path = "/billing/{currency}/{minor}/format",
    tag = "Billing",
    params(
        ("currency" = String, Path, description = "ISO 4217 code: USD, EUR, GBP or INR"),
        ("minor" = i64, Path, description = "Amount in minor units (cents)"),
        FormatQuery
    ),
    responses(
        (status = 200, description = "Formatted amount", body = FormatResponse),
        (status = 400, description = "Unknown currency or locale, or malformed amount")
    )
)]
pub async fn format_amount(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    context: RouteContext,
) -> AppResult<Response> {
    let locale = match query.locale.as_deref() {
        Some(tag) => tag.parse::<Locale>()?,
        None => Locale::default(),
    };
    dispatch(&FormatAmount { locale }, state, context).await
}

/// Route handler formatting the `currency`/`minor` captures in one locale.
pub struct FormatAmount {
    pub locale: Locale,
}

#[async_trait]
impl RouteHandler for FormatAmount {
    async fn handle(&self, _state: AppState, params: RouteParams) -> AppResult<Response> {
        let currency: Currency = params.parse("currency")?;
        let minor: i64 = params.parse("minor")?;
        let money = Money::new(minor, currency);

        let body = FormatResponse {
            formatted: format_currency(money, self.locale),
            currency: currency.code().to_string(),
            minor,
            locale: self.locale.tag().to_string(),
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }
}
