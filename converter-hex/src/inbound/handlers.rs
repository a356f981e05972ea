//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use converter_types::{AppError, ExchangeRateResponse, RateProvider, ResponseCache, SeriesResponse};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider, C: ResponseCache> {
    pub service: ConversionService<P, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            // Upstream failures carry only a status, never a payload.
            AppError::Upstream(status) => StatusCode::from_u16(status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Latest rates for a base currency.
#[tracing::instrument(skip(state))]
pub async fn latest<P: RateProvider, C: ResponseCache>(
    State(state): State<Arc<AppState<P, C>>>,
    Path(code): Path<String>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let response = state.service.latest(&code).await?;
    Ok(Json(response))
}

/// Converts an amount between two currencies.
#[tracing::instrument(skip(state))]
pub async fn convert<P: RateProvider, C: ResponseCache>(
    State(state): State<Arc<AppState<P, C>>>,
    Path((base_code, target_code, amount)): Path<(String, String, String)>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let response = state
        .service
        .convert(&base_code, &target_code, &amount)
        .await?;
    Ok(Json(response))
}

/// Historical rate series for a base currency.
#[tracing::instrument(skip(state))]
pub async fn history<P: RateProvider, C: ResponseCache>(
    State(state): State<Arc<AppState<P, C>>>,
    Path((begin_date, end_date, code)): Path<(String, String, String)>,
) -> Result<Json<SeriesResponse>, ApiError> {
    let response = state
        .service
        .history(&begin_date, &end_date, &code)
        .await?;
    Ok(Json(response))
}
