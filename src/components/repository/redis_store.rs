use super::{prepare_new, prepare_update, Entity, Repository};
use crate::error::{not_found_error, repository_error, AppResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, Script};
use std::marker::PhantomData;
use tracing::{debug, info};

/// Redis key layout
mod keys {
    pub const PREFIX: &str = "coachbook";

    /// JSON document of one entity
    pub fn entity(collection: &str, id: &str) -> String {
        format!("{}:{}:{}", PREFIX, collection, id)
    }

    /// List of ids in creation order
    pub fn ids(collection: &str) -> String {
        format!("{}:{}:ids", PREFIX, collection)
    }
}

/// Store the document only if its key is new, and index the id in the same
/// step. Returns 1 when stored, 0 when the key already existed.
const CREATE_SCRIPT: &str = r#"
if redis.call('SET', KEYS[1], ARGV[1], 'NX') then
    redis.call('RPUSH', KEYS[2], ARGV[2])
    return 1
end
return 0
"#;

/// Redis-backed repository storing each entity as a JSON string
pub struct RedisRepository<T: Entity> {
    client: RedisClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RedisRepository<T> {
    /// Create a repository on a (possibly shared) client
    pub fn with_client(client: RedisClient) -> Self {
        info!("Using Redis for {}", T::COLLECTION);
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Get a Redis connection from the client
    async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for RedisRepository<T> {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let mut conn = self.get_connection().await?;
        let data: Option<String> = conn.get(keys::entity(T::COLLECTION, id)).await?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        let mut conn = self.get_connection().await?;
        let ids: Vec<String> = conn.lrange(keys::ids(T::COLLECTION), 0, -1).await?;

        let mut entities = Vec::with_capacity(ids.len());
        for id in ids {
            let data: Option<String> = conn.get(keys::entity(T::COLLECTION, &id)).await?;
            match data {
                Some(json) => entities.push(serde_json::from_str(&json)?),
                None => debug!("Dangling {} id {} in index", T::COLLECTION, id),
            }
        }

        Ok(entities)
    }

    async fn create(&self, entity: T) -> AppResult<T> {
        let entity = prepare_new(entity);
        let key = keys::entity(T::COLLECTION, entity.id());
        let json = serde_json::to_string(&entity)?;

        let mut conn = self.get_connection().await?;
        let inserted: bool = Script::new(CREATE_SCRIPT)
            .key(&key)
            .key(keys::ids(T::COLLECTION))
            .arg(json)
            .arg(entity.id())
            .invoke_async(&mut conn)
            .await?;
        if !inserted {
            return Err(repository_error(&format!(
                "{} '{}' already exists",
                T::COLLECTION,
                entity.id()
            )));
        }

        Ok(entity)
    }

    async fn update(&self, id: &str, entity: T) -> AppResult<T> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(T::COLLECTION, id))?;

        let updated = prepare_update(&existing, entity);
        let json = serde_json::to_string(&updated)?;

        let mut conn = self.get_connection().await?;
        let _: () = conn.set(keys::entity(T::COLLECTION, id), json).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::{keys, CREATE_SCRIPT};

    #[test]
    fn test_create_script_indexes_with_the_write() {
        // Both writes happen inside one script, and the push only after NX succeeds
        let set = CREATE_SCRIPT.find("'SET', KEYS[1], ARGV[1], 'NX'").unwrap();
        let push = CREATE_SCRIPT.find("'RPUSH', KEYS[2], ARGV[2]").unwrap();
        assert!(set < push);
        assert_eq!(CREATE_SCRIPT.matches("redis.call").count(), 2);
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(keys::entity("users", "coach-001"), "coachbook:users:coach-001");
        assert_eq!(keys::ids("sessions"), "coachbook:sessions:ids");
    }
}
