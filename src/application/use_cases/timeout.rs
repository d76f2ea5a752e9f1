use std::future::Future;
use std::time::Duration;

use crate::domain::DomainError;

/// Bound a store operation. Expiry is reported as an internal error.
pub(crate) async fn bounded<T, F>(
    operation: &str,
    limit: Duration,
    future: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(limit, future).await.map_err(|_| {
        DomainError::internal(format!("{} timed out after {:?}", operation, limit))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_reports_timeout_as_internal_error() {
        let result: Result<(), DomainError> = bounded("find", Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "Internal error: find timed out after 5ms");
    }

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let result = bounded("find", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
