use chrono::Utc;
use contracts::domain::a001_fire_district::aggregate::{District, DistrictDraft, DistrictListItem};
use contracts::domain::a001_fire_district::export::ExportFormat;
use thiserror::Error;

use super::export::{self, ExportError, ExportFile};
use super::store_client::{DistrictStoreClient, StoreError, MAX_SEARCH_SIZE};

/// How many districts the list view shows
pub const LIST_LIMIT: usize = MAX_SEARCH_SIZE;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Save a new district: default name, creation time, write to the store
pub async fn save(store: &DistrictStoreClient, draft: DistrictDraft) -> Result<String, ServiceError> {
    let district = District::from_draft(draft, Utc::now());

    // Only well-formed geometry reaches the store
    district.validate().map_err(ServiceError::Validation)?;

    let id = store.create(&district).await?;
    tracing::info!("Saved district '{}' as {}", district.name, id);
    Ok(id)
}

/// Saved districts in store order
pub async fn list(store: &DistrictStoreClient) -> Result<Vec<DistrictListItem>, ServiceError> {
    Ok(store.search(LIST_LIMIT).await?)
}

/// Delete a district by id
pub async fn delete(store: &DistrictStoreClient, id: &str) -> Result<(), ServiceError> {
    store.delete_by_id(id).await?;
    tracing::info!("Deleted district {}", id);
    Ok(())
}

/// Export a district in one format
pub fn export_district(draft: &DistrictDraft, format: ExportFormat) -> Result<ExportFile, ServiceError> {
    Ok(export::export(draft, format)?)
}
