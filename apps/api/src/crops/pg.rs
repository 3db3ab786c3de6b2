use async_trait::async_trait;
use sqlx::PgPool;

use crate::crops::models::{normalize_id, CropRecord};
use crate::crops::store::CropStore;
use crate::errors::AppError;

/// `crops` table backed store. See `migrations/0001_create_crops.sql`.
#[derive(Clone)]
pub struct PgCropStore {
    pool: PgPool,
}

impl PgCropStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CropStore for PgCropStore {
    async fn all(&self) -> Result<Vec<CropRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, CropRecord>("SELECT * FROM crops ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn by_id(&self, id: &str) -> Result<Option<CropRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, CropRecord>("SELECT * FROM crops WHERE id = $1")
                .bind(normalize_id(id))
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn by_ph(&self, ph: f64) -> Result<Vec<CropRecord>, AppError> {
        Ok(sqlx::query_as::<_, CropRecord>(
            r#"
            SELECT *
            FROM crops
            WHERE ph_min <= $1 AND ph_max >= $1
            ORDER BY id
            "#,
        )
        .bind(ph)
        .fetch_all(&self.pool)
        .await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
