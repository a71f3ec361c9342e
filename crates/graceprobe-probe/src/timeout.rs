//! Bounding calls that may block forever.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The deadline passed before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation did not finish within {deadline:?}")]
pub struct Elapsed {
    /// The deadline that was exceeded.
    pub deadline: Duration,
}

/// Races `operation` against `deadline`.
///
/// Returns the operation's output if it finishes first. Otherwise returns
/// [`Elapsed`] and drops the operation, cancelling it; nothing keeps running
/// in the background after this returns.
///
/// # Errors
///
/// Returns [`Elapsed`] if the deadline fires first.
pub async fn race_with_timeout<F>(operation: F, deadline: Duration) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    if let Ok(output) = tokio::time::timeout(deadline, operation).await {
        Ok(output)
    } else {
        tracing::warn!(?deadline, "deadline reached, operation cancelled");
        Err(Elapsed { deadline })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fast_operation_wins() {
        let result = race_with_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                42
            },
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_operation_result_is_returned() {
        let result = race_with_timeout(async { Err::<(), _>("boom") }, Duration::from_secs(5)).await;
        assert_eq!(result, Ok(Err("boom")));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_times_out_at_deadline() {
        let start = tokio::time::Instant::now();
        let result = race_with_timeout(std::future::pending::<()>(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            Err(Elapsed {
                deadline: Duration::from_secs(5)
            })
        );
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn loser_is_cancelled() {
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(Arc::clone(&dropped));
        let operation = async move {
            let _flag = flag;
            tokio::time::sleep(Duration::from_secs(3600)).await;
        };
        assert!(race_with_timeout(operation, Duration::from_secs(5)).await.is_err());
        assert!(dropped.load(Ordering::SeqCst));
    }
}
