use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::product_variants::ProductVariantEntity;

#[async_trait]
#[automock]
pub trait ProductVariantRepository {
    /// Active, non-deleted variants among the requested ids.
    async fn list_active_by_ids(&self, variant_ids: Vec<i64>)
        -> Result<Vec<ProductVariantEntity>>;
}
