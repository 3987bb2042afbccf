use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::addresses::AddressEntity, repositories::addresses::AddressRepository,
    schema::addresses,
};

pub struct AddressPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AddressPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AddressRepository for AddressPostgres {
    async fn find_owned(&self, address_id: i64, user_id: i64) -> Result<Option<AddressEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let address = addresses::table
            .filter(addresses::id.eq(address_id))
            .filter(addresses::user_id.eq(user_id))
            .filter(addresses::deleted_at.is_null())
            .select(AddressEntity::as_select())
            .first::<AddressEntity>(&mut conn)
            .optional()?;

        Ok(address)
    }
}
