//! Timeout and retry policy applied to every PostgreSQL call

use std::future::Future;
use std::io;
use std::time::Duration;

use shop_core::error::DomainError;
use shop_shared::config::DatabaseSettings;
use tracing::{error, warn};

/// Every call is bounded by `timeout`. Reads may be retried once after a
/// transient failure; writes never are.
#[derive(Debug, Clone, Copy)]
pub struct StorePolicy {
    timeout: Duration,
    retry_transient_reads: bool,
}

impl StorePolicy {
    pub fn new(timeout: Duration, retry_transient_reads: bool) -> Self {
        Self { timeout, retry_transient_reads }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.statement_timeout_ms),
            settings.retry_transient_reads,
        )
    }

    pub async fn read<T, F, Fut>(&self, op: &'static str, mut call: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        match self.attempt(op, call()).await {
            Err(e) if self.retry_transient_reads && is_transient(&e) => {
                warn!(op, "Transient database error, retrying once: {}", e);
                self.attempt(op, call()).await.map_err(|e| storage_failure(op, e))
            }
            other => other.map_err(|e| storage_failure(op, e)),
        }
    }

    /// Raw `sqlx::Error` is handed back so callers can recognise constraint
    /// violations.
    pub async fn write<T, Fut>(&self, op: &'static str, call: Fut) -> Result<T, sqlx::Error>
    where
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        self.attempt(op, call).await
    }

    async fn attempt<T, Fut>(&self, op: &'static str, call: Fut) -> Result<T, sqlx::Error>
    where
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{} exceeded {:?}", op, self.timeout),
            ))),
        }
    }
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), true)
    }
}

fn is_transient(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
}

pub(crate) fn storage_failure(op: &'static str, e: sqlx::Error) -> DomainError {
    error!(op, "Database error: {}", e);
    DomainError::StorageFailure(format!("{}: {}", op, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_read_retries_transient_failure_once() {
        let calls = AtomicUsize::new(0);
        let policy = StorePolicy::new(Duration::from_secs(1), true);

        let value = policy
            .read("probe", || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(sqlx::Error::PoolTimedOut)
                    } else {
                        Ok(7)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_read_gives_up_after_second_failure() {
        let calls = AtomicUsize::new(0);
        let policy = StorePolicy::new(Duration::from_secs(1), true);

        let result: Result<i32, _> = policy
            .read("probe", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(sqlx::Error::PoolTimedOut) }
            })
            .await;

        assert!(matches!(result, Err(DomainError::StorageFailure(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transient_errors_are_not_retried() {
        let calls = AtomicUsize::new(0);
        let policy = StorePolicy::new(Duration::from_secs(1), true);

        let result: Result<i32, _> = policy
            .read("probe", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(sqlx::Error::RowNotFound) }
            })
            .await;

        assert!(matches!(result, Err(DomainError::StorageFailure(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let policy = StorePolicy::new(Duration::from_millis(20), false);

        let result = policy
            .write("probe", async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok::<_, sqlx::Error>(1)
            })
            .await;

        assert!(matches!(result, Err(sqlx::Error::Io(ref e)) if e.kind() == io::ErrorKind::TimedOut));
    }
}
