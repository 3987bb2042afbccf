use std::sync::Arc;

use thiserror::Error;
use tracing::{error, warn};

use domain::{
    repositories::delivery_batches::DeliveryBatchRepository,
    value_objects::delivery_batches::DeliveryBatchDto,
};

#[derive(Debug, Error)]
pub enum DeliveryBatchError {
    #[error("delivery batch not found")]
    BatchNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DeliveryBatchError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            DeliveryBatchError::BatchNotFound => StatusCode::NOT_FOUND,
            DeliveryBatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DeliveryBatchError::BatchNotFound => "BATCH_NOT_FOUND",
            DeliveryBatchError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub struct DeliveryBatchUseCase<B>
where
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    batch_repo: Arc<B>,
}

impl<B> DeliveryBatchUseCase<B>
where
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    pub fn new(batch_repo: Arc<B>) -> Self {
        Self { batch_repo }
    }

    pub async fn list(&self) -> Result<Vec<DeliveryBatchDto>, DeliveryBatchError> {
        let batches = self.batch_repo.list_recent().await.map_err(|err| {
            error!(db_error = ?err, "delivery_batches: failed to list batches");
            DeliveryBatchError::Internal(err)
        })?;

        Ok(batches.into_iter().map(DeliveryBatchDto::from).collect())
    }

    pub async fn get(&self, batch_id: i64) -> Result<DeliveryBatchDto, DeliveryBatchError> {
        let batch = self
            .batch_repo
            .find_by_id(batch_id)
            .await
            .map_err(|err| {
                error!(batch_id, db_error = ?err, "delivery_batches: failed to load batch");
                DeliveryBatchError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(batch_id, "delivery_batches: not found");
                DeliveryBatchError::BatchNotFound
            })?;

        Ok(DeliveryBatchDto::from(batch))
    }
}
