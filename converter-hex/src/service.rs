//! Conversion Application Service
//!
//! Orchestrates the request pipeline: validate, consult the response cache,
//! call the upstream provider, cache the success. Contains NO transport
//! logic - the provider and cache are injected ports.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use converter_types::{
    AppError, ExchangeRateResponse, RateProvider, ResponseCache, SeriesResponse, UpstreamResult,
    validation,
};

/// How long a successful response stays cached, for every endpoint.
pub const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Application service for the three conversion operations.
///
/// Generic over its two ports - the adapters are injected at compile time.
/// This enables:
/// - Swapping the upstream client or cache backend without code changes
/// - Testing with mock providers and an in-memory cache
///
/// Operations take the raw route segments: parsing belongs to validation,
/// and cache keys are composed from the literal parameter values, so `10`
/// and `10.0` are distinct keys even though they parse to the same amount.
pub struct ConversionService<P: RateProvider, C: ResponseCache> {
    provider: P,
    cache: C,
}

impl<P: RateProvider, C: ResponseCache> ConversionService<P, C> {
    /// Creates a new service with the given provider and cache.
    pub fn new(provider: P, cache: C) -> Self {
        Self { provider, cache }
    }

    /// Latest rates quoted against `code`.
    pub async fn latest(&self, code: &str) -> Result<ExchangeRateResponse, AppError> {
        let request = validation::validate_latest(code)?;

        let key = format!("latest:{code}");
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let result = self.provider.latest(&request.code).await;
        self.finish(key, result).await
    }

    /// Converts `amount` of `base_code` into `target_code`.
    pub async fn convert(
        &self,
        base_code: &str,
        target_code: &str,
        amount: &str,
    ) -> Result<ExchangeRateResponse, AppError> {
        let request = validation::validate_convert(base_code, target_code, amount)?;

        let key = format!("convert:{base_code}:{target_code}:{amount}");
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let result = self
            .provider
            .convert(&request.base_code, &request.target_code, request.amount)
            .await;
        self.finish(key, result).await
    }

    /// Rate series for `code` over the requested date range.
    pub async fn history(
        &self,
        begin_date: &str,
        end_date: &str,
        code: &str,
    ) -> Result<SeriesResponse, AppError> {
        let request = validation::validate_history(begin_date, end_date, code)?;

        let key = format!("history:{begin_date}:{end_date}:{code}");
        if let Some(hit) = self.cached(&key).await {
            return Ok(hit);
        }

        let result = self
            .provider
            .history(request.begin_date, request.end_date, &request.code)
            .await;
        self.finish(key, result).await
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.lookup(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                // An undecodable entry counts as a miss; the pipeline recomputes it.
                tracing::warn!(key, %error, "discarding undecodable cache entry");
                None
            }
        }
    }

    /// Caches a success and maps a failure to its surfaced status.
    /// Failures are never cached - the next identical request re-attempts
    /// the upstream.
    async fn finish<T: Serialize>(
        &self,
        key: String,
        result: UpstreamResult<T>,
    ) -> Result<T, AppError> {
        match result {
            UpstreamResult::Success(payload) => {
                match serde_json::to_string(&payload) {
                    Ok(raw) => self.cache.store(key, raw, CACHE_TTL).await,
                    Err(error) => tracing::warn!(key = %key, %error, "response not cached"),
                }
                Ok(payload)
            }
            UpstreamResult::Failure(status) => Err(AppError::Upstream(status)),
        }
    }
}
