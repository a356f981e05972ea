//! Wire shapes for upstream responses.
//!
//! These mirror the upstream provider's JSON exactly; the gateway forwards
//! them to callers unchanged. Both are immutable once decoded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single-date rate quote, returned by the latest and convert endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    /// Amount the rates are quoted against
    #[schema(example = 1.0)]
    pub amount: f64,
    /// Base currency code
    #[schema(example = "USD")]
    pub base: String,
    /// Quote date as an ISO-8601 calendar date
    #[schema(example = "2024-01-01")]
    pub date: String,
    /// Rate per target currency code
    pub rates: HashMap<String, f64>,
}

/// A date-range series of rate quotes, returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesResponse {
    /// Amount the rates are quoted against
    #[schema(example = 1.0)]
    pub amount: f64,
    /// Base currency code
    #[schema(example = "USD")]
    pub base: String,
    /// First date of the series
    #[serde(rename = "start_date")]
    #[schema(example = "2024-01-01")]
    pub begin_date: String,
    /// Last date of the series
    #[serde(rename = "end_date")]
    #[schema(example = "2024-01-31")]
    pub end_date: String,
    /// Per-date mapping of target currency code to rate
    pub rates: HashMap<String, HashMap<String, f64>>,
}
