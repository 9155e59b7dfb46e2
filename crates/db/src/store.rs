//! Store call discipline: uniform deadline and driver error mapping.

use std::future::Future;
use std::time::Duration;

use civinet_common::{AppError, AppResult};

/// Deadline applied uniformly to every store call.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a store future under the uniform deadline. Driver errors map to
/// [`AppError::Database`]; an elapsed timer surfaces as [`AppError::Timeout`]
/// instead of hanging the request.
pub async fn with_timeout<T, F>(operation: &str, future: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sea_orm::DbErr>>,
{
    bounded(STORE_TIMEOUT, operation, future).await
}

/// Same deadline for multi-statement operations (transactions) that already
/// produce an [`AppResult`].
pub async fn with_deadline<T, F>(operation: &str, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, future).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(operation.to_string())),
    }
}

async fn bounded<T, F>(deadline: Duration, operation: &str, future: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sea_orm::DbErr>>,
{
    match tokio::time::timeout(deadline, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(AppError::Database(err.to_string())),
        Err(_) => Err(AppError::Timeout(operation.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = with_timeout("noop", async { Ok::<_, sea_orm::DbErr>(7) }).await;
        assert_eq!(result.ok(), Some(7));
    }

    #[tokio::test]
    async fn test_driver_error_maps_to_database() {
        let result: AppResult<()> = with_timeout("failing select", async {
            Err(sea_orm::DbErr::Custom("connection reset".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_elapsed_deadline_surfaces_timeout() {
        let result: AppResult<()> = bounded(Duration::from_millis(5), "slow select", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        match result {
            Err(AppError::Timeout(op)) => assert_eq!(op, "slow select"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
