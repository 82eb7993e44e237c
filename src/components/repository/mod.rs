mod memory;
mod redis_store;

pub use memory::InMemoryRepository;
pub use redis_store::RedisRepository;

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record that can live in a repository
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection (table) name, also used in storage keys
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn created_at(&self) -> DateTime<Utc>;

    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// Records without an update timestamp keep the default no-op
    fn set_updated_at(&mut self, _at: DateTime<Utc>) {}
}

/// Storage for one collection of entities
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    /// Get an entity by id
    async fn get_by_id(&self, id: &str) -> AppResult<Option<T>>;

    /// All entities, in the order they were created
    async fn list(&self) -> AppResult<Vec<T>>;

    /// Store a new entity, assigning an id when it has none
    async fn create(&self, entity: T) -> AppResult<T>;

    /// Replace an existing entity; id and creation time are preserved
    async fn update(&self, id: &str, entity: T) -> AppResult<T>;
}

/// Fill in id and timestamps for a record about to be created
pub(crate) fn prepare_new<T: Entity>(mut entity: T) -> T {
    if entity.id().is_empty() {
        entity.set_id(uuid::Uuid::new_v4().to_string());
    }
    let now = Utc::now();
    entity.set_created_at(now);
    entity.set_updated_at(now);
    entity
}

/// Carry identity over from the stored record into its replacement
pub(crate) fn prepare_update<T: Entity>(existing: &T, mut replacement: T) -> T {
    replacement.set_id(existing.id().to_string());
    replacement.set_created_at(existing.created_at());
    replacement.set_updated_at(Utc::now());
    replacement
}
