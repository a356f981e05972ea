//! # Converter Client SDK
//!
//! A typed Rust client for the conversion gateway API.

use converter_types::{ExchangeRateResponse, FieldViolation, SeriesResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Conversion gateway API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the gateway is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Latest rates quoted against `code`.
    pub async fn latest(&self, code: &str) -> Result<ExchangeRateResponse, ClientError> {
        self.get(&format!("/latest/{code}")).await
    }

    /// Converts `amount` (its literal rendering) of `base_code` into `target_code`.
    pub async fn convert(
        &self,
        base_code: &str,
        target_code: &str,
        amount: &str,
    ) -> Result<ExchangeRateResponse, ClientError> {
        self.get(&format!("/convert/{base_code}/{target_code}/{amount}"))
            .await
    }

    /// Rate series for `code` between two `YYYY-MM-DD` dates.
    pub async fn history(
        &self,
        begin_date: &str,
        end_date: &str,
        code: &str,
    ) -> Result<SeriesResponse, ClientError> {
        self.get(&format!("/history/{begin_date}/{end_date}/{code}"))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            // Validation failures arrive as a list of field violations;
            // upstream-mapped failures have no body at all.
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Vec<FieldViolation>>(&body)
                .ok()
                .map(|violations| {
                    violations
                        .iter()
                        .map(|v| format!("{}: {}", v.field, v.message))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ConverterClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ConverterClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
