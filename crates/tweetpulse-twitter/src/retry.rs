//! Two-class retry with per-kind backoff for the search API.
//!
//! Rate limits and transient connectivity failures are deliberately distinct
//! retry classes: a 429 means a quota window has to be waited out (long
//! backoff), while a connection reset is usually momentary (short backoff).
//! Everything else is fatal and surfaces immediately.

use std::future::Future;
use std::time::Duration;

use crate::cancel::CancelToken;
use crate::error::TwitterError;

/// Retry classification of a single failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimit,
    Transient,
    Fatal,
}

impl ErrorClass {
    /// Folds library-specific failures into the closed retry-class set.
    ///
    /// **`RateLimit`:** a 429 from the API.
    ///
    /// **`Transient`:** timeouts, connection-level failures, and 5xx
    /// responses: retrying after a short wait can succeed.
    ///
    /// **`Fatal`:** auth failures, malformed queries, deserialization
    /// mismatches: waiting cannot fix these.
    #[must_use]
    pub fn of(err: &TwitterError) -> Self {
        match err {
            TwitterError::RateLimited { .. } => Self::RateLimit,
            TwitterError::Http(e) => {
                if e.is_timeout() || e.is_connect() {
                    return Self::Transient;
                }
                match e.status() {
                    Some(status) if status.is_server_error() => Self::Transient,
                    Some(_) => Self::Fatal,
                    // No HTTP status means the failure happened below the
                    // protocol layer (reset, disconnect mid-body).
                    None => Self::Transient,
                }
            }
            _ => Self::Fatal,
        }
    }
}

/// Attempt budget and per-class backoff durations.
///
/// All three values come from configuration; tests drive them to zero (or
/// run under a paused tokio clock) for determinism.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub rate_limit_backoff: Duration,
    pub transient_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(15 * 60),
            transient_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    fn backoff_for(&self, class: ErrorClass) -> Duration {
        match class {
            ErrorClass::RateLimit => self.rate_limit_backoff,
            _ => self.transient_backoff,
        }
    }
}

/// Per-call retry bookkeeping, dropped once the call resolves.
struct RetryState<'a> {
    policy: &'a RetryPolicy,
    attempts: u32,
    last_class: Option<ErrorClass>,
}

impl RetryState<'_> {
    fn exhausted(self, last: TwitterError) -> TwitterError {
        match self.last_class {
            Some(ErrorClass::RateLimit) => TwitterError::RateLimitExhausted {
                attempts: self.attempts,
                source: Box::new(last),
            },
            _ => TwitterError::ConnectivityExhausted {
                attempts: self.attempts,
                source: Box::new(last),
            },
        }
    }
}

/// Runs `operation` until it succeeds, turns fatal, or the attempt budget is
/// spent.
///
/// Every attempt re-issues the full request: nothing partial is carried
/// across retries. Each backoff sleep is logged and races against `cancel`;
/// a cancellation surfaces [`TwitterError::Cancelled`] rather than stale or
/// partial data.
pub(crate) async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &mut CancelToken,
    mut operation: F,
) -> Result<T, TwitterError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TwitterError>>,
{
    let mut state = RetryState {
        policy,
        attempts: 0,
        last_class: None,
    };

    loop {
        if cancel.is_cancelled() {
            return Err(TwitterError::Cancelled {
                attempts: state.attempts,
            });
        }
        state.attempts += 1;

        match operation().await {
            Ok(value) => {
                tracing::debug!(attempts = state.attempts, "search call succeeded");
                return Ok(value);
            }
            Err(err) => {
                let class = ErrorClass::of(&err);
                state.last_class = Some(class);

                if class == ErrorClass::Fatal {
                    return Err(err);
                }
                if state.attempts >= state.policy.max_attempts {
                    return Err(state.exhausted(err));
                }

                let delay = state.policy.backoff_for(class);
                tracing::warn!(
                    attempt = state.attempts,
                    max_attempts = state.policy.max_attempts,
                    delay_secs = delay.as_secs(),
                    kind = ?class,
                    error = %err,
                    "retryable search failure, backing off"
                );
                tokio::select! {
                    () = tokio::time::sleep(delay) => {}
                    () = cancel.cancelled() => {
                        return Err(TwitterError::Cancelled {
                            attempts: state.attempts,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::cancel::cancellation;

    fn rate_limited() -> TwitterError {
        TwitterError::RateLimited {
            reset_after_secs: None,
        }
    }

    fn api_error() -> TwitterError {
        TwitterError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        }
    }

    fn zero_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            rate_limit_backoff: Duration::ZERO,
            transient_backoff: Duration::ZERO,
        }
    }

    #[test]
    fn rate_limited_classifies_as_rate_limit() {
        assert_eq!(ErrorClass::of(&rate_limited()), ErrorClass::RateLimit);
    }

    #[test]
    fn api_error_classifies_as_fatal() {
        assert_eq!(ErrorClass::of(&api_error()), ErrorClass::Fatal);
    }

    #[test]
    fn deserialize_error_classifies_as_fatal() {
        let source = serde_json::from_str::<()>("nope").unwrap_err();
        let err = TwitterError::Deserialize {
            context: "test".to_string(),
            source,
        };
        assert_eq!(ErrorClass::of(&err), ErrorClass::Fatal);
    }

    #[tokio::test]
    async fn connect_error_classifies_as_transient() {
        // Port 1 on 0.0.0.0 refuses: a real connect-level reqwest error.
        let err = reqwest::Client::new()
            .get("http://0.0.0.0:1")
            .send()
            .await
            .unwrap_err();
        assert_eq!(ErrorClass::of(&TwitterError::Http(err)), ErrorClass::Transient);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&zero_policy(), &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, TwitterError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&zero_policy(), &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, TwitterError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_rate_limit_reports_attempt_count() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&zero_policy(), &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, TwitterError>(rate_limited())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "no attempts past the budget");
        assert!(matches!(
            result,
            Err(TwitterError::RateLimitExhausted { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn fatal_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&zero_policy(), &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, TwitterError>(api_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "fatal errors must not retry");
        assert!(matches!(result, Err(TwitterError::Api { status: 401, .. })));
    }

    /// Rate-limited on attempts 1 and 2, success on 3: under a paused clock
    /// the virtual elapsed time is exactly two rate-limit backoffs.
    #[tokio::test(start_paused = true)]
    async fn sleeps_exactly_twice_before_third_attempt_success() {
        let policy = RetryPolicy {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(900),
            transient_backoff: Duration::from_secs(10),
        };
        let start = tokio::time::Instant::now();
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&policy, &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(rate_limited())
                } else {
                    Ok::<&str, TwitterError>("ok")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(start.elapsed(), Duration::from_secs(1800));
    }

    /// Transient failures use the short backoff, not the quota wait.
    #[tokio::test(start_paused = true)]
    async fn transient_class_uses_short_backoff() {
        let policy = RetryPolicy {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(900),
            transient_backoff: Duration::from_secs(10),
        };
        let start = tokio::time::Instant::now();
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&policy, &mut CancelToken::never(), || {
            let c = Arc::clone(&c);
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 2 {
                    let err = reqwest::Client::new()
                        .get("http://0.0.0.0:1")
                        .send()
                        .await
                        .unwrap_err();
                    Err(TwitterError::Http(err))
                } else {
                    Ok::<u32, TwitterError>(1)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_backoff_wait() {
        let policy = RetryPolicy {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(900),
            transient_backoff: Duration::from_secs(10),
        };
        let (handle, mut token) = cancellation();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            handle.cancel();
        });
        let start = tokio::time::Instant::now();
        let result = fetch_with_retry(&policy, &mut token, || async {
            Err::<u32, TwitterError>(rate_limited())
        })
        .await;
        assert!(matches!(
            result,
            Err(TwitterError::Cancelled { attempts: 1 })
        ));
        assert!(
            start.elapsed() < Duration::from_secs(900),
            "cancellation must cut the backoff short"
        );
    }

    #[tokio::test]
    async fn pre_cancelled_token_skips_all_attempts() {
        let (handle, mut token) = cancellation();
        handle.cancel();
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = fetch_with_retry(&zero_policy(), &mut token, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, TwitterError>(1)
            }
        })
        .await;
        assert!(matches!(result, Err(TwitterError::Cancelled { attempts: 0 })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
