use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::record::{EntityRecord, RecordStore, RowQuery};

/// Read side of the catalog. Reads go straight to the store, outside any
/// audited session.
pub struct CatalogQueryService {
    pub(super) store: Arc<dyn RecordStore>,
}

impl CatalogQueryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub(super) async fn get<T: EntityRecord>(&self, id: i64) -> ApplicationResult<T> {
        let row = self.store.fetch(T::KIND, id).await?.ok_or_else(|| {
            ApplicationError::not_found(format!("{} {id} not found", T::KIND.label()))
        })?;
        Ok(T::from_row(row)?)
    }

    pub(super) async fn list<T: EntityRecord>(&self, query: &RowQuery) -> ApplicationResult<Vec<T>> {
        self.store
            .list(T::KIND, query)
            .await?
            .into_iter()
            .map(|row| T::from_row(row).map_err(ApplicationError::from))
            .collect()
    }
}
