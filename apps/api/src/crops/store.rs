use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::crops::models::{normalize_id, CropRecord};
use crate::crops::reference::reference_crops;
use crate::errors::AppError;
use crate::schema::ValidationError;

/// Read-only access to the crop reference collection. Results are ordered by id.
#[async_trait]
pub trait CropStore: Send + Sync {
    async fn all(&self) -> Result<Vec<CropRecord>, AppError>;

    /// `id` is matched case-insensitively.
    async fn by_id(&self, id: &str) -> Result<Option<CropRecord>, AppError>;

    /// Every crop whose `[ph_min, ph_max]` contains `ph`.
    async fn by_ph(&self, ph: f64) -> Result<Vec<CropRecord>, AppError>;

    /// Short backend label for `/health`.
    fn backend(&self) -> &'static str;
}

pub struct MemoryCropStore {
    crops: BTreeMap<String, CropRecord>,
}

impl MemoryCropStore {
    pub fn new(records: Vec<CropRecord>) -> Result<Self, ValidationError> {
        let mut crops = BTreeMap::new();
        for record in records {
            record.check()?;
            if crops.contains_key(&record.id) {
                return Err(ValidationError::new(
                    "id",
                    format!("duplicate crop id '{}'", record.id),
                ));
            }
            crops.insert(record.id.clone(), record);
        }
        Ok(Self { crops })
    }

    pub fn with_reference_data() -> Result<Self, ValidationError> {
        Self::new(reference_crops())
    }
}

#[async_trait]
impl CropStore for MemoryCropStore {
    async fn all(&self) -> Result<Vec<CropRecord>, AppError> {
        Ok(self.crops.values().cloned().collect())
    }

    async fn by_id(&self, id: &str) -> Result<Option<CropRecord>, AppError> {
        Ok(self.crops.get(&normalize_id(id)).cloned())
    }

    async fn by_ph(&self, ph: f64) -> Result<Vec<CropRecord>, AppError> {
        Ok(self
            .crops
            .values()
            .filter(|c| c.contains_ph(ph))
            .cloned()
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
