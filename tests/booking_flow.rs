use chrono::NaiveDate;
use coachbook::components::availability::DayOfWeek;
use coachbook::components::marketplace::{BookingRequest, SessionStatus, User, UserRole};
use coachbook::components::DataService;
use coachbook::error::Error;
use coachbook::seed::{self, DEMO_ATHLETE_ID, DEMO_COACH_ID, DEMO_SECOND_COACH_ID};

// 2023-01-02 was a Monday, 2023-01-04 a Wednesday
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 4).unwrap()
}

async fn seeded() -> DataService {
    let service = DataService::in_memory();
    seed::demo_data(&service).await.unwrap();
    service
}

fn request(date: NaiveDate, time: &str) -> BookingRequest {
    BookingRequest {
        date: Some(date),
        time: Some(time.to_string()),
        ..BookingRequest::default()
    }
}

#[tokio::test]
async fn test_bookable_slots_and_disabled_days() {
    let service = seeded().await;

    assert_eq!(
        service.bookable_slots(DEMO_COACH_ID, monday()).await.unwrap(),
        vec!["9:00 AM", "10:00 AM", "11:00 AM"]
    );
    assert!(service.bookable_slots(DEMO_COACH_ID, wednesday()).await.unwrap().is_empty());
    assert!(service.is_day_disabled_for(DEMO_COACH_ID, wednesday()).await.unwrap());
    assert!(!service.is_day_disabled_for(DEMO_COACH_ID, monday()).await.unwrap());

    // A coach who never saved a schedule has nothing to offer
    assert!(service.bookable_slots(DEMO_SECOND_COACH_ID, monday()).await.unwrap().is_empty());
    assert!(service.is_day_disabled_for(DEMO_SECOND_COACH_ID, monday()).await.unwrap());
}

#[tokio::test]
async fn test_request_session_defaults_from_coach() {
    let service = seeded().await;

    let session = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(monday(), "10:00 AM"))
        .await
        .unwrap();

    assert!(!session.id.is_empty());
    assert_eq!(session.status, SessionStatus::Pending);
    assert_eq!(session.time, "10:00 AM");
    assert_eq!(session.session_type, "Technique Analysis");
    assert_eq!(session.location.as_deref(), Some("San Francisco, CA"));
    assert_eq!(session.notes, None);

    let for_coach = service.sessions_for_user(DEMO_COACH_ID, UserRole::Coach, None).await.unwrap();
    let for_athlete = service
        .sessions_for_user(DEMO_ATHLETE_ID, UserRole::Athlete, None)
        .await
        .unwrap();
    assert_eq!(for_coach, vec![session.clone()]);
    assert_eq!(for_athlete, vec![session]);
    assert!(service
        .sessions_for_user(DEMO_ATHLETE_ID, UserRole::Coach, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_request_session_keeps_athlete_details() {
    let service = seeded().await;

    let session = service
        .request_session(
            DEMO_COACH_ID,
            DEMO_ATHLETE_ID,
            BookingRequest {
                session_type: Some("Serve practice".to_string()),
                location: Some("Golden Gate Park courts".to_string()),
                notes: Some("Bring extra balls".to_string()),
                ..request(monday(), "9:00 AM")
            },
        )
        .await
        .unwrap();

    assert_eq!(session.session_type, "Serve practice");
    assert_eq!(session.location.as_deref(), Some("Golden Gate Park courts"));
    assert_eq!(session.notes.as_deref(), Some("Bring extra balls"));
}

#[tokio::test]
async fn test_request_session_validation() {
    let service = seeded().await;

    // Missing time
    let result = service
        .request_session(
            DEMO_COACH_ID,
            DEMO_ATHLETE_ID,
            BookingRequest {
                date: Some(monday()),
                ..BookingRequest::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    // Slot outside the schedule
    let result = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(monday(), "3:00 PM"))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    // Day off
    let result = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(wednesday(), "9:00 AM"))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    // Booking an athlete as if they were a coach
    let result = service
        .request_session(DEMO_ATHLETE_ID, DEMO_COACH_ID, request(monday(), "9:00 AM"))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    // Unknown coach
    let result = service
        .request_session("coach-404", DEMO_ATHLETE_ID, request(monday(), "9:00 AM"))
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_update_session_status() {
    let service = seeded().await;
    let session = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(monday(), "11:00 AM"))
        .await
        .unwrap();

    let accepted = service
        .update_session_status(&session.id, SessionStatus::Scheduled)
        .await
        .unwrap();
    assert_eq!(accepted.status, SessionStatus::Scheduled);
    assert_eq!(accepted.created_at, session.created_at);

    let result = service.update_session_status("missing", SessionStatus::Cancelled).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_sessions_split_by_status() {
    let service = seeded().await;
    let first = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(monday(), "9:00 AM"))
        .await
        .unwrap();
    let second = service
        .request_session(DEMO_COACH_ID, DEMO_ATHLETE_ID, request(monday(), "10:00 AM"))
        .await
        .unwrap();
    service
        .update_session_status(&second.id, SessionStatus::Scheduled)
        .await
        .unwrap();

    let pending = service
        .sessions_for_user(DEMO_COACH_ID, UserRole::Coach, Some(SessionStatus::Pending))
        .await
        .unwrap();
    let scheduled = service
        .sessions_for_user(DEMO_ATHLETE_ID, UserRole::Athlete, Some(SessionStatus::Scheduled))
        .await
        .unwrap();
    let cancelled = service
        .sessions_for_user(DEMO_COACH_ID, UserRole::Coach, Some(SessionStatus::Cancelled))
        .await
        .unwrap();

    assert_eq!(pending.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec![first.id.as_str()]);
    assert_eq!(scheduled.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec![second.id.as_str()]);
    assert!(cancelled.is_empty());
}

#[tokio::test]
async fn test_search_matches() {
    let service = seeded().await;

    // Athletes see coaches; the term matches name or sport in any case
    let by_name = service.search_matches(UserRole::Athlete, "sarah", None).await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, DEMO_COACH_ID);

    let by_sport = service.search_matches(UserRole::Athlete, "BASKET", None).await.unwrap();
    assert_eq!(by_sport.len(), 1);
    assert_eq!(by_sport[0].id, DEMO_SECOND_COACH_ID);

    // An empty term lists everyone of the other role
    assert_eq!(service.search_matches(UserRole::Athlete, "", None).await.unwrap().len(), 2);
    assert_eq!(service.search_matches(UserRole::Athlete, "", Some("all")).await.unwrap().len(), 2);

    // Sport filter is exact and combines with the term
    let tennis = service.search_matches(UserRole::Athlete, "", Some("Tennis")).await.unwrap();
    assert_eq!(tennis.len(), 1);
    assert_eq!(tennis[0].id, DEMO_COACH_ID);
    assert!(service
        .search_matches(UserRole::Athlete, "mike", Some("Tennis"))
        .await
        .unwrap()
        .is_empty());

    // Coaches see athletes
    let athletes = service.search_matches(UserRole::Coach, "alex", None).await.unwrap();
    assert_eq!(athletes.len(), 1);
    assert_eq!(athletes[0].id, DEMO_ATHLETE_ID);
}

#[tokio::test]
async fn test_available_coaches() {
    let service = seeded().await;

    let monday_coaches = service.available_coaches("Tennis", DayOfWeek::Mon).await.unwrap();
    assert_eq!(monday_coaches.len(), 1);
    assert_eq!(monday_coaches[0].coach.id, DEMO_COACH_ID);
    assert_eq!(monday_coaches[0].availability.time_blocks[0].name, "Morning");

    assert!(service.available_coaches("Tennis", DayOfWeek::Wed).await.unwrap().is_empty());
    // Basketball coach has no schedule yet
    assert!(service.available_coaches("Basketball", DayOfWeek::Mon).await.unwrap().is_empty());
    assert!(service.available_coaches("Golf", DayOfWeek::Mon).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_user_profile() {
    let service = seeded().await;
    let mut coach = service.user(DEMO_SECOND_COACH_ID).await.unwrap().unwrap();
    coach.sport = Some("Tennis".to_string());

    service.update_user(DEMO_SECOND_COACH_ID, coach).await.unwrap();
    assert_eq!(service.coaches_in_sport("Tennis").await.unwrap().len(), 2);

    let stranger = User::new("Nobody", "nobody@test.com", UserRole::Athlete);
    let result = service.update_user("user-404", stranger).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}
