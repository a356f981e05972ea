//! # Converter Upstream
//!
//! Outbound adapter for the Frankfurter exchange-rate API, implementing the
//! `RateProvider` port.
//!
//! Every operation goes through the same path: build the query, send it
//! under the resilience policy (timeout, bounded retries with backoff,
//! circuit breaker), read the full body, then normalize the outcome into an
//! `UpstreamResult`. The normalization table is identical for all three
//! operations:
//!
//! - transport failure after retries => `Failure(502/503/504)`
//! - non-2xx status => `Failure(status)`, body never parsed
//! - 2xx with an undecodable or null body => `Failure(500)`
//! - 2xx with a well-formed payload => `Success(payload)`

mod resilience;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use converter_types::{ExchangeRateResponse, RateProvider, SeriesResponse, UpstreamResult};

pub use resilience::{CircuitBreaker, ResilienceConfig};

const MAX_BODY_EXCERPT: usize = 256;

/// HTTP client for the Frankfurter API.
pub struct FrankfurterClient {
    base_url: String,
    http: reqwest::Client,
    config: ResilienceConfig,
    breaker: CircuitBreaker,
}

impl FrankfurterClient {
    /// Creates a client with the default resilience policy.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::with_config(base_url, ResilienceConfig::default())
    }

    /// Creates a client with a custom resilience policy.
    pub fn with_config(
        base_url: impl Into<String>,
        config: ResilienceConfig,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            breaker: CircuitBreaker::new(config.failure_threshold, config.recovery_timeout),
            config,
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> UpstreamResult<T> {
        let (status, body) = match self.send_with_policy(endpoint).await {
            Ok(outcome) => outcome,
            Err(mapped_status) => return UpstreamResult::Failure(mapped_status),
        };

        if !status.is_success() {
            tracing::error!(
                endpoint,
                status = status.as_u16(),
                body = excerpt(&body),
                "upstream returned a non-success status"
            );
            return UpstreamResult::Failure(status.as_u16());
        }

        // A decode error and a well-formed `null` are the same failure to
        // our caller; only the log entry tells them apart.
        match serde_json::from_str::<Option<T>>(&body) {
            Ok(Some(payload)) => UpstreamResult::Success(payload),
            Ok(None) => {
                tracing::error!(endpoint, body = excerpt(&body), "upstream response is null");
                UpstreamResult::internal_error()
            }
            Err(error) => {
                tracing::error!(
                    endpoint,
                    error = %error,
                    body = excerpt(&body),
                    "error parsing upstream response"
                );
                UpstreamResult::internal_error()
            }
        }
    }

    /// Sends the request under the resilience policy.
    ///
    /// Returns the final status and the full body (read before the status is
    /// inspected, so a diagnostic payload is always available), or the
    /// status to surface when no response was obtained at all.
    async fn send_with_policy(&self, endpoint: &str) -> Result<(StatusCode, String), u16> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut last_failure = 502;

        for attempt in 0..=self.config.max_retries {
            if !self.breaker.allow() {
                tracing::warn!(endpoint, "circuit open, failing fast");
                return Err(503);
            }
            if attempt > 0 {
                tokio::time::sleep(self.config.backoff_delay(attempt)).await;
            }

            let error = match self.http.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    match response.text().await {
                        Ok(body) => {
                            if status.is_server_error() {
                                self.breaker.record_failure();
                            } else {
                                self.breaker.record_success();
                            }
                            if is_retryable_status(status) && attempt < self.config.max_retries {
                                tracing::warn!(
                                    endpoint,
                                    status = status.as_u16(),
                                    attempt,
                                    "retryable upstream status"
                                );
                                continue;
                            }
                            return Ok((status, body));
                        }
                        Err(error) => error,
                    }
                }
                Err(error) => error,
            };

            self.breaker.record_failure();
            last_failure = if error.is_timeout() { 504 } else { 502 };
            tracing::warn!(endpoint, error = %error, attempt, "transport error calling upstream");
        }

        Err(last_failure)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || matches!(status.as_u16(), 408 | 429)
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[async_trait::async_trait]
impl RateProvider for FrankfurterClient {
    #[tracing::instrument(skip(self))]
    async fn latest(&self, code: &str) -> UpstreamResult<ExchangeRateResponse> {
        self.get(&format!("/latest?from={code}")).await
    }

    #[tracing::instrument(skip(self))]
    async fn convert(
        &self,
        base_code: &str,
        target_code: &str,
        amount: f64,
    ) -> UpstreamResult<ExchangeRateResponse> {
        self.get(&format!(
            "/latest?from={base_code}&to={target_code}&amount={amount}"
        ))
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn history(
        &self,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        code: &str,
    ) -> UpstreamResult<SeriesResponse> {
        self.get(&format!("/{begin_date}..{end_date}?from={code}"))
            .await
    }
}
