use crate::components::availability::{DayAvailability, WeeklyAvailability};
use crate::components::repository::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Coach,
    Athlete,
}

impl UserRole {
    /// The role a user of this role is matched with
    pub fn counterpart(&self) -> UserRole {
        match self {
            UserRole::Coach => UserRole::Athlete,
            UserRole::Athlete => UserRole::Coach,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Coach => write!(f, "coach"),
            UserRole::Athlete => write!(f, "athlete"),
        }
    }
}

/// A coach or athlete profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Hourly rate
    #[serde(default)]
    pub rate: Option<u32>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new profile with only the required fields
    pub fn new(name: &str, email: &str, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            address: None,
            sport: None,
            bio: None,
            specialties: Vec::new(),
            rate: None,
            rating: None,
            experience_level: None,
            goals: Vec::new(),
            profile_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_coach(&self) -> bool {
        self.role == UserRole::Coach
    }
}

/// A coach's recurring weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachAvailability {
    #[serde(default)]
    pub id: String,
    pub coach_id: String,
    pub schedule: WeeklyAvailability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoachAvailability {
    pub fn new(coach_id: &str, schedule: WeeklyAvailability) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            coach_id: coach_id.to_string(),
            schedule,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Where a booked session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Requested by the athlete, waiting for the coach
    Pending,
    /// Accepted by the coach
    Scheduled,
    Cancelled,
}

/// A booked or requested coaching session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: String,
    pub coach_id: String,
    pub athlete_id: String,
    pub date: NaiveDate,
    /// Slot start as offered, e.g. "9:00 AM"
    pub time: String,
    pub session_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A direct message between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: &str, receiver_id: &str, content: &str) -> Self {
        Self {
            id: String::new(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// The other participant, seen from `user_id`
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        if self.sender_id == user_id {
            Some(&self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(&self.sender_id)
        } else {
            None
        }
    }
}

/// What an athlete fills in when requesting a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub session_type: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Latest activity with one conversation partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub partner_id: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: usize,
}

/// A coach who takes bookings on a given weekday, with that day's blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableCoach {
    pub coach: User,
    pub availability: DayAvailability,
}

macro_rules! impl_entity {
    ($ty:ty, $collection:literal) => {
        impl Entity for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn set_created_at(&mut self, at: DateTime<Utc>) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, at: DateTime<Utc>) {
                self.updated_at = at;
            }
        }
    };
}

impl_entity!(User, "users");
impl_entity!(CoachAvailability, "availability");
impl_entity!(Session, "sessions");

impl Entity for Message {
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }
}
