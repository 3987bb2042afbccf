use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::product_variants::ProductVariantEntity,
    repositories::product_variants::ProductVariantRepository, schema::product_variants,
};

pub struct ProductVariantPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ProductVariantPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProductVariantRepository for ProductVariantPostgres {
    async fn list_active_by_ids(
        &self,
        variant_ids: Vec<i64>,
    ) -> Result<Vec<ProductVariantEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = product_variants::table
            .filter(product_variants::id.eq_any(variant_ids))
            .filter(product_variants::is_active.eq(true))
            .filter(product_variants::deleted_at.is_null())
            .select(ProductVariantEntity::as_select())
            .load::<ProductVariantEntity>(&mut conn)?;

        Ok(results)
    }
}
