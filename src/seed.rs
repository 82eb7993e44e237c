use crate::components::availability::{DayAvailability, DayOfWeek, TimeBlock, WeeklyAvailability};
use crate::components::marketplace::{DataService, User, UserRole};
use crate::error::AppResult;
use tracing::{debug, info};

pub const DEMO_COACH_ID: &str = "coach-001";
pub const DEMO_SECOND_COACH_ID: &str = "coach-002";
pub const DEMO_ATHLETE_ID: &str = "athlete-001";

fn demo_users() -> Vec<User> {
    let mut sarah = User::new("Sarah Johnson", "sarah.j@test.com", UserRole::Coach);
    sarah.id = DEMO_COACH_ID.to_string();
    sarah.address = Some("San Francisco, CA".to_string());
    sarah.rate = Some(75);
    sarah.bio = Some("Professional tennis coach with 10+ years of experience.".to_string());
    sarah.specialties = vec!["Technique Analysis".to_string(), "Mental Training".to_string()];
    sarah.sport = Some("Tennis".to_string());
    sarah.rating = Some(4.8);

    let mut mike = User::new("Mike Chen", "mike.c@test.com", UserRole::Coach);
    mike.id = DEMO_SECOND_COACH_ID.to_string();
    mike.address = Some("Los Angeles, CA".to_string());
    mike.rate = Some(65);
    mike.bio = Some("Former college basketball player turned coach.".to_string());
    mike.specialties = vec!["Shooting Technique".to_string(), "Defense".to_string()];
    mike.sport = Some("Basketball".to_string());
    mike.rating = Some(4.2);

    let mut alex = User::new("Alex Ray", "alex.r@test.com", UserRole::Athlete);
    alex.id = DEMO_ATHLETE_ID.to_string();
    alex.address = Some("San Francisco, CA".to_string());
    alex.bio = Some("Passionate tennis player looking to improve technique.".to_string());
    alex.sport = Some("Tennis".to_string());
    alex.experience_level = Some("Intermediate".to_string());
    alex.goals = vec!["Improve serve technique".to_string(), "Compete in tournaments".to_string()];

    vec![sarah, mike, alex]
}

/// Weekly schedule of the first demo coach
pub fn demo_schedule() -> WeeklyAvailability {
    let open = |name: &str, range: &str| DayAvailability::open(vec![TimeBlock::with_range(name, range)]);

    WeeklyAvailability::default()
        .with_day(DayOfWeek::Mon, open("Morning", "9:00 AM - 12:00 PM"))
        .with_day(DayOfWeek::Tue, open("Afternoon", "1:00 PM - 5:00 PM"))
        .with_day(DayOfWeek::Wed, DayAvailability::closed())
        .with_day(DayOfWeek::Thu, open("Evening", "6:00 PM - 9:00 PM"))
        .with_day(DayOfWeek::Fri, open("Morning", "9:00 AM - 1:00 PM"))
        .with_day(DayOfWeek::Sat, DayAvailability::closed())
        .with_day(DayOfWeek::Sun, open("All Day", "10:00 AM - 4:00 PM"))
}

/// Load the demo coaches, athlete and schedule into a store
pub async fn demo_data(service: &DataService) -> AppResult<()> {
    for user in demo_users() {
        if service.user(&user.id).await?.is_some() {
            debug!("Demo user {} already present", user.id);
            continue;
        }
        service.create_user(user).await?;
    }
    service.upsert_availability(DEMO_COACH_ID, demo_schedule()).await?;

    info!("Seeded demo data");
    Ok(())
}
