//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::{ExchangeRateResponse, FieldViolation, SeriesResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Latest rates quoted against a base currency
#[utoipa::path(
    get,
    path = "/latest/{code}",
    tag = "rates",
    params(
        ("code" = String, Path, description = "3-letter uppercase currency code", example = "USD")
    ),
    responses(
        (status = 200, description = "Latest rates for the base currency", body = ExchangeRateResponse),
        (status = 400, description = "Code failed validation", body = Vec<FieldViolation>),
        (status = 404, description = "Upstream does not know the currency")
    )
)]
async fn latest() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/convert/{base_code}/{target_code}/{amount}",
    tag = "rates",
    params(
        ("base_code" = String, Path, description = "3-letter uppercase source currency code", example = "USD"),
        ("target_code" = String, Path, description = "3-letter uppercase target currency code", example = "EUR"),
        ("amount" = f64, Path, description = "Amount to convert, at least 0.001", example = 10.5)
    ),
    responses(
        (status = 200, description = "Converted amount under the rates key", body = ExchangeRateResponse),
        (status = 400, description = "One or more parameters failed validation", body = Vec<FieldViolation>)
    )
)]
async fn convert() {}

/// Historical rate series for a base currency
#[utoipa::path(
    get,
    path = "/history/{begin_date}/{end_date}/{code}",
    tag = "rates",
    params(
        ("begin_date" = String, Path, description = "First date of the series (YYYY-MM-DD)", example = "2024-01-01"),
        ("end_date" = String, Path, description = "Last date of the series (YYYY-MM-DD)", example = "2024-01-31"),
        ("code" = String, Path, description = "3-letter uppercase currency code", example = "USD")
    ),
    responses(
        (status = 200, description = "Per-date rate series", body = SeriesResponse),
        (status = 400, description = "Dates or code failed validation", body = Vec<FieldViolation>)
    )
)]
async fn history() {}

/// OpenAPI documentation for the conversion gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Conversion Gateway API",
        version = "1.0.0",
        description = "Currency conversion endpoints backed by the Frankfurter exchange-rate API. Successful responses are cached for 10 minutes per distinct set of route parameters.",
    ),
    paths(health, latest, convert, history),
    components(
        schemas(
            ExchangeRateResponse,
            SeriesResponse,
            FieldViolation,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Latest, conversion, and historical rate lookups"),
    )
)]
pub struct ApiDoc;
