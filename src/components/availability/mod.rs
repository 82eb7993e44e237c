//! Coach weekly availability and the bookable slots derived from it.

mod editor;
pub mod models;
pub mod slots;
pub mod time;
pub mod weekday;

pub use editor::PRESET_TIME_BLOCKS;
pub use models::{DayAvailability, TimeBlock, WeeklyAvailability};
pub use slots::{derive_slots, is_day_disabled};
pub use weekday::DayOfWeek;
