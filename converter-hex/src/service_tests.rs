//! ConversionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use converter_types::{
        AppError, ExchangeRateResponse, RateProvider, ResponseCache, SeriesResponse,
        UpstreamResult,
    };

    use crate::ConversionService;

    pub fn sample_rate() -> ExchangeRateResponse {
        ExchangeRateResponse {
            amount: 10.0,
            base: "USD".to_string(),
            date: "2024-01-01".to_string(),
            rates: HashMap::from([("EUR".to_string(), 0.85), ("GBP".to_string(), 0.78)]),
        }
    }

    pub fn sample_series() -> SeriesResponse {
        SeriesResponse {
            amount: 1.0,
            base: "USD".to_string(),
            begin_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            rates: HashMap::from([(
                "2024-01-02".to_string(),
                HashMap::from([("EUR".to_string(), 0.85)]),
            )]),
        }
    }

    /// Scripted provider that counts calls and records history arguments.
    pub struct MockProvider {
        pub calls: Arc<AtomicUsize>,
        pub last_history: Arc<Mutex<Option<(NaiveDate, NaiveDate, String)>>>,
        rate_result: UpstreamResult<ExchangeRateResponse>,
        series_result: UpstreamResult<SeriesResponse>,
    }

    impl MockProvider {
        pub fn succeeding() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                last_history: Arc::new(Mutex::new(None)),
                rate_result: UpstreamResult::Success(sample_rate()),
                series_result: UpstreamResult::Success(sample_series()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                rate_result: UpstreamResult::Failure(status),
                series_result: UpstreamResult::Failure(status),
                ..Self::succeeding()
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn latest(&self, _code: &str) -> UpstreamResult<ExchangeRateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rate_result.clone()
        }

        async fn convert(
            &self,
            _base_code: &str,
            _target_code: &str,
            _amount: f64,
        ) -> UpstreamResult<ExchangeRateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rate_result.clone()
        }

        async fn history(
            &self,
            begin_date: NaiveDate,
            end_date: NaiveDate,
            code: &str,
        ) -> UpstreamResult<SeriesResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_history.lock().unwrap() = Some((begin_date, end_date, code.to_string()));
            self.series_result.clone()
        }
    }

    /// Map-backed cache without expiry; TTL behavior is covered by the
    /// cache adapter's own tests.
    pub struct MockCache {
        pub entries: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self {
                entries: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl ResponseCache for MockCache {
        async fn lookup(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn store(&self, key: String, value: String, _ttl: Duration) {
            self.entries.lock().unwrap().insert(key, value);
        }
    }

    fn service_with(
        provider: MockProvider,
    ) -> (
        ConversionService<MockProvider, MockCache>,
        Arc<AtomicUsize>,
        Arc<Mutex<HashMap<String, String>>>,
    ) {
        let calls = provider.calls.clone();
        let cache = MockCache::new();
        let entries = cache.entries.clone();
        (ConversionService::new(provider, cache), calls, entries)
    }

    #[tokio::test]
    async fn test_latest_success_returns_the_upstream_payload() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        let response = service.latest("USD").await.unwrap();

        assert_eq!(response, sample_rate());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_latest_rejects_malformed_code_before_calling_upstream() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        let result = service.latest("usd").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_convert_rejects_excluded_currency_before_calling_upstream() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        let result = service.convert("USD", "TRY", "10").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_convert_rejects_out_of_range_amount_before_calling_upstream() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        let result = service.convert("USD", "USD", "-10").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identical_requests_within_ttl_hit_the_cache() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        let first = service.latest("USD").await.unwrap();
        let second = service.latest("USD").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_keys_vary_on_the_literal_amount() {
        let (service, calls, entries) = service_with(MockProvider::succeeding());

        service.convert("USD", "EUR", "10").await.unwrap();
        service.convert("USD", "EUR", "10.0").await.unwrap();

        // Same parsed amount, different literals: both reach the upstream.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let entries = entries.lock().unwrap();
        assert!(entries.contains_key("convert:USD:EUR:10"));
        assert!(entries.contains_key("convert:USD:EUR:10.0"));
    }

    #[tokio::test]
    async fn test_keys_vary_on_the_endpoint_name() {
        let (service, calls, _) = service_with(MockProvider::succeeding());

        service.latest("USD").await.unwrap();
        service
            .history("2024-01-01", "2024-01-31", "USD")
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_surfaced_verbatim() {
        let (service, _, _) = service_with(MockProvider::failing(404));

        let result = service.latest("AAA").await;

        assert_eq!(result, Err(AppError::Upstream(404)));
    }

    #[tokio::test]
    async fn test_failures_are_never_cached() {
        let (service, calls, entries) = service_with(MockProvider::failing(503));

        let _ = service.latest("USD").await;
        let _ = service.latest("USD").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_forwards_parsed_dates() {
        let provider = MockProvider::succeeding();
        let last_history = provider.last_history.clone();
        let (service, _, _) = service_with(provider);

        service
            .history("2024-02-01", "2024-01-01", "USD")
            .await
            .unwrap();

        let (begin, end, code) = last_history.lock().unwrap().clone().unwrap();
        // Ordering is forwarded as-is, never validated.
        assert_eq!(begin, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(code, "USD");
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_falls_through_to_upstream() {
        let (service, calls, entries) = service_with(MockProvider::succeeding());
        entries
            .lock()
            .unwrap()
            .insert("latest:USD".to_string(), "{not json".to_string());

        let response = service.latest("USD").await.unwrap();

        assert_eq!(response, sample_rate());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
