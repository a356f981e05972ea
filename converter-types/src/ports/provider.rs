//! Upstream rate provider port.
//!
//! This trait defines the interface for the exchange-rate service the
//! gateway forwards to. Implementations can be HTTP clients, mock
//! providers, etc.

use chrono::NaiveDate;

use crate::dto::{ExchangeRateResponse, SeriesResponse};

/// Normalized outcome of an upstream call.
///
/// A true sum type: exactly one branch is populated. Every failure mode -
/// non-2xx status, transport error after retries, undecodable or null body -
/// collapses into `Failure` with the status code to surface. Callers never
/// see transport errors.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult<T> {
    /// Upstream answered 2xx with a well-formed payload.
    Success(T),
    /// The status code to surface to our caller, with no payload.
    Failure(u16),
}

impl<T> UpstreamResult<T> {
    /// Failure used for undecodable or null 2xx bodies.
    pub fn internal_error() -> Self {
        Self::Failure(500)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Status code of the outcome; `Success` is always a 200.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure(status) => *status,
        }
    }
}

/// Port trait for the upstream rate provider.
///
/// All three operations translate their parameters into one upstream query
/// and normalize the outcome through the same rule set - implementations
/// must not special-case per-operation behavior. Cancellation is drop-based:
/// dropping the returned future aborts the in-flight call.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Latest rates quoted against `code`.
    async fn latest(&self, code: &str) -> UpstreamResult<ExchangeRateResponse>;

    /// Converts `amount` of `base_code` into `target_code`.
    async fn convert(
        &self,
        base_code: &str,
        target_code: &str,
        amount: f64,
    ) -> UpstreamResult<ExchangeRateResponse>;

    /// Rate series for `code` over the inclusive date range.
    async fn history(
        &self,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        code: &str,
    ) -> UpstreamResult<SeriesResponse>;
}
