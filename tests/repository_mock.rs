use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook::components::marketplace::{BookingRequest, CoachAvailability, Message, Session, User};
use coachbook::components::repository::{Entity, InMemoryRepository, Repository};
use coachbook::components::DataService;
use coachbook::error::{repository_error, AppResult, Error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock store that is always down, for checking error propagation
#[derive(Debug, Default)]
struct UnavailableStore {
    calls: AtomicUsize,
}

impl UnavailableStore {
    fn fail<T>(&self) -> AppResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(repository_error("connection refused"))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for UnavailableStore {
    async fn get_by_id(&self, _id: &str) -> AppResult<Option<T>> {
        self.fail()
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        self.fail()
    }

    async fn create(&self, _entity: T) -> AppResult<T> {
        self.fail()
    }

    async fn update(&self, _id: &str, _entity: T) -> AppResult<T> {
        self.fail()
    }
}

fn service_with_broken_availability(store: Arc<UnavailableStore>) -> DataService {
    DataService::new(
        Arc::new(InMemoryRepository::<User>::new()),
        store,
        Arc::new(InMemoryRepository::<Session>::new()),
        Arc::new(InMemoryRepository::<Message>::new()),
    )
}

/// Store failures are reported, never turned into "no slots"
#[tokio::test]
async fn test_store_failure_is_not_an_empty_schedule() {
    let store = Arc::new(UnavailableStore::default());
    let service = service_with_broken_availability(store.clone());
    let monday = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();

    let result = service.bookable_slots("coach-001", monday).await;
    assert!(matches!(result, Err(Error::Repository(_))));

    let result = service.is_day_disabled_for("coach-001", monday).await;
    assert!(matches!(result, Err(Error::Repository(_))));

    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upsert_surfaces_store_failure() {
    let store = Arc::new(UnavailableStore::default());
    let service = service_with_broken_availability(store);

    let result = service
        .upsert_availability("coach-001", Default::default())
        .await;
    assert!(matches!(result, Err(Error::Repository(_))));
}

#[tokio::test]
async fn test_booking_stops_at_broken_users_store() {
    let service = DataService::new(
        Arc::new(UnavailableStore::default()),
        Arc::new(InMemoryRepository::<CoachAvailability>::new()),
        Arc::new(InMemoryRepository::<Session>::new()),
        Arc::new(InMemoryRepository::<Message>::new()),
    );

    let request = BookingRequest {
        date: NaiveDate::from_ymd_opt(2023, 1, 2),
        time: Some("9:00 AM".to_string()),
        ..BookingRequest::default()
    };
    let result = service.request_session("coach-001", "athlete-001", request).await;
    assert!(matches!(result, Err(Error::Repository(_))));
}
