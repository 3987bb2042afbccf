use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::addresses::AddressEntity;

#[async_trait]
#[automock]
pub trait AddressRepository {
    /// Address must belong to the user and not be soft-deleted.
    async fn find_owned(&self, address_id: i64, user_id: i64) -> Result<Option<AddressEntity>>;
}
