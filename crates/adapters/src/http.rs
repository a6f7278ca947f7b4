//! Shared HTTP plumbing: client construction and retry with backoff

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// Per-call timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How often and how patiently a request is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, including the first one
    pub max_attempts: u32,
    /// Wait before the second try; doubles for every further try
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after the failed attempt `attempt` (0-based): `base_delay * 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }
}

/// Waits between retries; swapped out in tests to observe backoff
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Build the HTTP client shared by an adapter
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("newsfront/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
}

/// Send `request`, retrying rate limits and transport failures.
///
/// A 429 is retried after `policy.delay_for(attempt)` unless it was the last
/// attempt, in which case the 429 response itself is returned. Any other
/// response is returned as-is. Transport errors are retried the same way and
/// the last one is returned once attempts run out.
pub async fn send_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<Response, reqwest::Error> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        // Streaming bodies can't be replayed
        let Some(current) = request.try_clone() else {
            return request.send().await;
        };

        let is_last = attempt + 1 >= attempts;
        let delay = policy.delay_for(attempt);

        match current.send().await {
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS && !is_last => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying"
                );
            }
            Err(e) if !is_last => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Request failed, retrying"
                );
            }
            result => return result,
        }

        sleeper.sleep(delay).await;
        attempt += 1;
    }
}

/// Truncated response body for error messages
pub(crate) async fn error_body(response: Response) -> String {
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > 512 {
        let mut end = 512;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSleeper;
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_rate_limited_twice_then_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .expect(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = build_client(DEFAULT_TIMEOUT);
        let sleeper = RecordingSleeper::default();
        let request = client.get(format!("{}/feed", mock_server.uri()));

        let response = send_with_retry(request, &RetryPolicy::default(), &sleeper)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            sleeper.waits(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_rate_limited_on_last_attempt_returns_429() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = build_client(DEFAULT_TIMEOUT);
        let sleeper = RecordingSleeper::default();

        let response = send_with_retry(
            client.get(mock_server.uri()),
            &RetryPolicy::default(),
            &sleeper,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(sleeper.waits().len(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = build_client(DEFAULT_TIMEOUT);
        let sleeper = RecordingSleeper::default();

        let response = send_with_retry(
            client.get(mock_server.uri()),
            &RetryPolicy::default(),
            &sleeper,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(sleeper.waits().is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_retry_then_surface() {
        // Nothing listens on the discard port
        let client = build_client(Duration::from_secs(2));
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
        };

        let result = send_with_retry(client.get("http://127.0.0.1:9/"), &policy, &sleeper).await;

        assert!(result.is_err());
        assert_eq!(
            sleeper.waits(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }
}
