//! Debounced, cancellable suggestion requests.
//!
//! Each keystroke begins a new request and cancels the previous one through
//! its token, so only the most recently issued request can resolve with
//! suggestions. A superseded request reports that outcome explicitly instead
//! of masquerading as a failure, which makes last-request-wins assertable in
//! tests without racing the clock.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{model::CitySuggestion, provider::WeatherProvider};

/// How long input must settle before a request is sent upstream.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Suggestions for the most recent query (possibly empty).
    Ready(Vec<CitySuggestion>),
    /// A newer request was issued; this result must be discarded.
    Superseded,
    /// The upstream call failed.
    Failed(String),
}

/// Issues suggestion requests, one live at a time.
#[derive(Debug)]
pub struct SuggestionFeed {
    in_flight: Option<CancellationToken>,
    debounce: Duration,
}

impl Default for SuggestionFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionFeed {
    pub fn new() -> Self {
        Self::with_debounce(DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self { in_flight: None, debounce }
    }

    /// Begin a request for `query`, superseding any request still in flight.
    /// The returned request is run by the caller (typically on its own task).
    pub fn begin(&mut self, query: impl Into<String>) -> SuggestRequest {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        SuggestRequest { query: query.into(), token, debounce: self.debounce }
    }
}

/// A single debounced suggestion request.
#[derive(Debug)]
pub struct SuggestRequest {
    query: String,
    token: CancellationToken,
    debounce: Duration,
}

impl SuggestRequest {
    /// Wait out the debounce, then fetch, racing the cancellation token at
    /// both stages. A blank query resolves to no suggestions without
    /// touching the provider.
    pub async fn run(self, provider: Arc<dyn WeatherProvider>) -> SuggestOutcome {
        let query = self.query.trim().to_owned();
        if query.is_empty() {
            return SuggestOutcome::Ready(Vec::new());
        }

        tokio::select! {
            () = self.token.cancelled() => return SuggestOutcome::Superseded,
            () = tokio::time::sleep(self.debounce) => {}
        }

        tokio::select! {
            () = self.token.cancelled() => SuggestOutcome::Superseded,
            result = provider.suggest_cities(&query) => match result {
                Ok(suggestions) => SuggestOutcome::Ready(suggestions),
                Err(err) => SuggestOutcome::Failed(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use async_trait::async_trait;
    use serde_json::Value;

    #[derive(Debug)]
    struct SlowSuggester {
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl WeatherProvider for SlowSuggester {
        async fn current_weather(&self, _city: &str) -> Result<Value, UpstreamError> {
            Err(UpstreamError::Network("not a weather test".into()))
        }

        async fn suggest_cities(
            &self,
            query: &str,
        ) -> Result<Vec<CitySuggestion>, UpstreamError> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(UpstreamError::Timeout);
            }
            Ok(vec![CitySuggestion {
                name: query.to_owned(),
                state: None,
                country: "IN".into(),
            }])
        }
    }

    fn provider(delay_ms: u64, fail: bool) -> Arc<dyn WeatherProvider> {
        Arc::new(SlowSuggester { delay: Duration::from_millis(delay_ms), fail })
    }

    #[tokio::test(start_paused = true)]
    async fn request_waits_out_the_debounce() {
        let mut feed = SuggestionFeed::new();
        let started = tokio::time::Instant::now();

        let outcome = feed.begin("Mumbai").run(provider(10, false)).await;

        assert!(matches!(outcome, SuggestOutcome::Ready(ref s) if s[0].name == "Mumbai"));
        assert!(started.elapsed() >= DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_request_supersedes_the_one_in_flight() {
        let provider = provider(100, false);
        let mut feed = SuggestionFeed::new();

        let first = feed.begin("Mum");
        let first_task = tokio::spawn(first.run(provider.clone()));

        // next keystroke lands mid-debounce
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = feed.begin("Mumbai");
        let second_task = tokio::spawn(second.run(provider));

        assert_eq!(first_task.await.expect("join"), SuggestOutcome::Superseded);
        let outcome = second_task.await.expect("join");
        assert!(matches!(outcome, SuggestOutcome::Ready(ref s) if s[0].name == "Mumbai"));
    }

    #[tokio::test(start_paused = true)]
    async fn supersession_reaches_a_request_already_fetching() {
        let provider = provider(10_000, false);
        let mut feed = SuggestionFeed::new();

        let first = feed.begin("Mum");
        let first_task = tokio::spawn(first.run(provider.clone()));

        // past the debounce, the fetch itself is now pending
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(50)).await;
        let second = feed.begin("Mumbai");
        let second_task = tokio::spawn(second.run(provider));

        assert_eq!(first_task.await.expect("join"), SuggestOutcome::Superseded);
        assert!(matches!(second_task.await.expect("join"), SuggestOutcome::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn upstream_failure_is_distinct_from_supersession() {
        let mut feed = SuggestionFeed::new();

        let outcome = feed.begin("Mumbai").run(provider(10, true)).await;

        assert_eq!(outcome, SuggestOutcome::Failed("Request timed out".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_resolves_immediately_to_nothing() {
        let mut feed = SuggestionFeed::new();
        let started = tokio::time::Instant::now();

        let outcome = feed.begin("   ").run(provider(10, false)).await;

        assert_eq!(outcome, SuggestOutcome::Ready(Vec::new()));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
