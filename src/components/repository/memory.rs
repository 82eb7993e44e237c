use super::{prepare_new, prepare_update, Entity, Repository};
use crate::error::{not_found_error, repository_error, AppResult};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory implementation of a repository (demo data and tests)
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    entities: RwLock<Vec<T>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let entities = self.entities.read().await;
        Ok(entities.iter().find(|e| e.id() == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        let entities = self.entities.read().await;
        Ok(entities.clone())
    }

    async fn create(&self, entity: T) -> AppResult<T> {
        let entity = prepare_new(entity);
        let mut entities = self.entities.write().await;

        if entities.iter().any(|e| e.id() == entity.id()) {
            return Err(repository_error(&format!(
                "{} '{}' already exists",
                T::COLLECTION,
                entity.id()
            )));
        }

        entities.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, entity: T) -> AppResult<T> {
        let mut entities = self.entities.write().await;
        let slot = entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| not_found_error(T::COLLECTION, id))?;

        let updated = prepare_update(slot, entity);
        *slot = updated.clone();
        Ok(updated)
    }
}
