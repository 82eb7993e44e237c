use super::models::{AvailableCoach, User, UserRole};
use super::DataService;
use crate::components::availability::DayOfWeek;
use crate::error::AppResult;

/// Sport filter value that matches every sport
pub const ALL_SPORTS: &str = "all";

impl DataService {
    /// Coaches who teach the given sport
    pub async fn coaches_in_sport(&self, sport: &str) -> AppResult<Vec<User>> {
        let coaches = self.users_by_role(UserRole::Coach).await?;
        Ok(coaches
            .into_iter()
            .filter(|c| c.sport.as_deref() == Some(sport))
            .collect())
    }

    /// Dashboard search: users of the other role whose name or sport contains
    /// `term` (any case), limited to one sport unless `sport` is `None` or "all"
    pub async fn search_matches(
        &self,
        viewer_role: UserRole,
        term: &str,
        sport: Option<&str>,
    ) -> AppResult<Vec<User>> {
        let term = term.trim().to_lowercase();
        let sport = sport.map(str::trim).filter(|s| !s.eq_ignore_ascii_case(ALL_SPORTS));

        let candidates = self.users_by_role(viewer_role.counterpart()).await?;
        Ok(candidates
            .into_iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&term)
                    || u.sport.as_deref().is_some_and(|s| s.to_lowercase().contains(&term))
            })
            .filter(|u| sport.map_or(true, |sport| u.sport.as_deref() == Some(sport)))
            .collect())
    }

    /// Coaches of a sport who take bookings on the given weekday
    pub async fn available_coaches(&self, sport: &str, day: DayOfWeek) -> AppResult<Vec<AvailableCoach>> {
        let mut available = Vec::new();

        for coach in self.coaches_in_sport(sport).await? {
            let Some(record) = self.availability_for_coach(&coach.id).await? else {
                continue;
            };
            if let Some(availability) = record.schedule.day(day).filter(|d| d.available) {
                available.push(AvailableCoach {
                    availability: availability.clone(),
                    coach,
                });
            }
        }

        Ok(available)
    }
}
