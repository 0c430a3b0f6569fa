// src/application/commands/catalog/service.rs
use std::sync::Arc;

use crate::application::{
    error::ApplicationResult,
    ports::{security::PasswordHasher, time::Clock},
    session::SessionFactory,
};
use crate::domain::record::EntityRecord;

/// Write side of the catalog. Every command runs in its own audited session.
pub struct CatalogCommandService {
    pub(super) sessions: Arc<SessionFactory>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CatalogCommandService {
    pub fn new(
        sessions: Arc<SessionFactory>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            password_hasher,
            clock,
        }
    }

    pub(super) async fn create<T: EntityRecord>(&self, new: T::New) -> ApplicationResult<T> {
        let mut session = self.sessions.begin().await?;
        let entity = session.insert::<T>(&new).await?;
        session.commit().await?;
        Ok(entity)
    }

    pub(super) async fn update<T: EntityRecord>(
        &self,
        id: i64,
        update: T::Update,
    ) -> ApplicationResult<T> {
        let mut session = self.sessions.begin().await?;
        let entity = session.update::<T>(id, &update).await?;
        session.commit().await?;
        Ok(entity)
    }

    pub(super) async fn delete<T: EntityRecord>(&self, id: i64) -> ApplicationResult<()> {
        let mut session = self.sessions.begin().await?;
        session.delete::<T>(id).await?;
        session.commit().await?;
        Ok(())
    }
}
