mod booking;
mod messaging;
pub mod models;
mod queries;

pub use models::{
    AvailableCoach, BookingRequest, CoachAvailability, ConversationSummary, Message, Session,
    SessionStatus, User, UserRole,
};
pub use queries::ALL_SPORTS;

use crate::components::availability::WeeklyAvailability;
use crate::components::repository::{InMemoryRepository, RedisRepository, Repository};
use crate::error::{not_found_error, AppResult};
use std::sync::Arc;
use tracing::info;

/// Data access for the marketplace. Every collection sits behind a
/// `Repository`, so the backing store can be swapped without touching callers.
#[derive(Clone)]
pub struct DataService {
    users: Arc<dyn Repository<User>>,
    availability: Arc<dyn Repository<CoachAvailability>>,
    sessions: Arc<dyn Repository<Session>>,
    messages: Arc<dyn Repository<Message>>,
}

impl DataService {
    /// Create a service over the given repositories
    pub fn new(
        users: Arc<dyn Repository<User>>,
        availability: Arc<dyn Repository<CoachAvailability>>,
        sessions: Arc<dyn Repository<Session>>,
        messages: Arc<dyn Repository<Message>>,
    ) -> Self {
        Self {
            users,
            availability,
            sessions,
            messages,
        }
    }

    /// Service backed by process memory
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<CoachAvailability>::new()),
            Arc::new(InMemoryRepository::<Session>::new()),
            Arc::new(InMemoryRepository::<Message>::new()),
        )
    }

    /// Service backed by Redis
    pub fn redis(redis_url: &str) -> AppResult<Self> {
        let client = redis::Client::open(redis_url)?;
        info!("Connecting data service to Redis at {}", redis_url);
        Ok(Self::new(
            Arc::new(RedisRepository::<User>::with_client(client.clone())),
            Arc::new(RedisRepository::<CoachAvailability>::with_client(client.clone())),
            Arc::new(RedisRepository::<Session>::with_client(client.clone())),
            Arc::new(RedisRepository::<Message>::with_client(client)),
        ))
    }

    /// Get a user by id
    pub async fn user(&self, id: &str) -> AppResult<Option<User>> {
        self.users.get_by_id(id).await
    }

    /// All users
    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    /// Users with the given role
    pub async fn users_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    pub async fn create_user(&self, user: User) -> AppResult<User> {
        let user = self.users.create(user).await?;
        info!("Created {} {}", user.role, user.id);
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, user: User) -> AppResult<User> {
        self.users.update(id, user).await
    }

    /// A coach's weekly schedule record, if one was ever saved
    pub async fn availability_for_coach(&self, coach_id: &str) -> AppResult<Option<CoachAvailability>> {
        let records = self.availability.list().await?;
        Ok(records.into_iter().find(|a| a.coach_id == coach_id))
    }

    /// Save a coach's weekly schedule, replacing any earlier one
    pub async fn upsert_availability(
        &self,
        coach_id: &str,
        schedule: WeeklyAvailability,
    ) -> AppResult<CoachAvailability> {
        match self.availability_for_coach(coach_id).await? {
            Some(existing) => {
                let mut record = existing.clone();
                record.schedule = schedule;
                self.availability.update(&existing.id, record).await
            }
            None => {
                info!("Creating availability for coach {}", coach_id);
                self.availability
                    .create(CoachAvailability::new(coach_id, schedule))
                    .await
            }
        }
    }

    /// Get a user that must exist
    pub(crate) async fn require_user(&self, id: &str) -> AppResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("users", id))
    }
}
