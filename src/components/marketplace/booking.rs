use super::models::{BookingRequest, Session, SessionStatus, UserRole};
use super::DataService;
use crate::components::availability::{derive_slots, is_day_disabled};
use crate::error::{not_found_error, validation_error, AppResult};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

/// Session type used when neither the athlete nor the coach names one
pub const DEFAULT_SESSION_TYPE: &str = "General Session";

impl DataService {
    /// Bookable slot starts for a coach on a date
    pub async fn bookable_slots(&self, coach_id: &str, date: NaiveDate) -> AppResult<Vec<String>> {
        let record = self.availability_for_coach(coach_id).await?;
        let slots = derive_slots(record.as_ref().map(|r| &r.schedule), date);
        debug!("{} slots for coach {} on {}", slots.len(), coach_id, date);
        Ok(slots)
    }

    /// Whether a booking calendar should grey out the date for this coach
    pub async fn is_day_disabled_for(&self, coach_id: &str, date: NaiveDate) -> AppResult<bool> {
        let record = self.availability_for_coach(coach_id).await?;
        Ok(is_day_disabled(record.as_ref().map(|r| &r.schedule), date))
    }

    /// Turn an athlete's booking request into a pending session
    pub async fn request_session(
        &self,
        coach_id: &str,
        athlete_id: &str,
        request: BookingRequest,
    ) -> AppResult<Session> {
        let (date, time) = match (request.date, request.time.as_deref().map(str::trim)) {
            (Some(date), Some(time)) if !time.is_empty() => (date, time.to_string()),
            _ => return Err(validation_error("Please select a date and time")),
        };

        let coach = self.require_user(coach_id).await?;
        if !coach.is_coach() {
            return Err(validation_error(&format!("User {} is not a coach", coach_id)));
        }

        let slots = self.bookable_slots(coach_id, date).await?;
        if !slots.contains(&time) {
            return Err(validation_error(&format!(
                "{} on {} is not an available slot",
                time, date
            )));
        }

        let session_type = request
            .session_type
            .filter(|s| !s.trim().is_empty())
            .or_else(|| coach.specialties.first().cloned())
            .unwrap_or_else(|| DEFAULT_SESSION_TYPE.to_string());

        let now = Utc::now();
        let session = Session {
            id: String::new(),
            coach_id: coach_id.to_string(),
            athlete_id: athlete_id.to_string(),
            date,
            time,
            session_type,
            location: request.location.filter(|l| !l.trim().is_empty()).or(coach.address),
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            status: SessionStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let session = self.sessions.create(session).await?;
        info!(
            "Session {} requested with coach {} on {} at {}",
            session.id, coach_id, session.date, session.time
        );
        Ok(session)
    }

    /// Sessions where the user takes part in the given role, optionally only
    /// those with one status (e.g. pending requests vs. scheduled sessions)
    pub async fn sessions_for_user(
        &self,
        user_id: &str,
        role: UserRole,
        status: Option<SessionStatus>,
    ) -> AppResult<Vec<Session>> {
        let sessions = self.sessions.list().await?;
        Ok(sessions
            .into_iter()
            .filter(|s| match role {
                UserRole::Coach => s.coach_id == user_id,
                UserRole::Athlete => s.athlete_id == user_id,
            })
            .filter(|s| status.map_or(true, |status| s.status == status))
            .collect())
    }

    /// Accept, cancel or otherwise move a session along
    pub async fn update_session_status(&self, id: &str, status: SessionStatus) -> AppResult<Session> {
        let mut session = self
            .sessions
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("sessions", id))?;

        session.status = status;
        let session = self.sessions.update(id, session).await?;
        info!("Session {} is now {:?}", id, session.status);
        Ok(session)
    }
}
