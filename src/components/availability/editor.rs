use super::models::{DayAvailability, TimeBlock, WeeklyAvailability};
use super::weekday::{DayOfWeek, SUNDAY_FIRST};

/// Blocks offered by the availability editor
pub const PRESET_TIME_BLOCKS: [&str; 3] = [
    "Morning (8am-12pm)",
    "Afternoon (12pm-5pm)",
    "Evening (5pm-9pm)",
];

impl WeeklyAvailability {
    /// Every weekday present, none of them available
    pub fn empty() -> Self {
        SUNDAY_FIRST
            .iter()
            .fold(Self::default(), |weekly, day| weekly.with_day(*day, DayAvailability::closed()))
    }

    /// Flip whether a day takes bookings; its blocks are kept
    pub fn toggle_day(&mut self, day: DayOfWeek) -> bool {
        let availability = self.day_mut(day);
        availability.available = !availability.available;
        availability.available
    }

    /// Remove the named block if present, otherwise append it.
    /// Returns true when the block is now part of the day.
    pub fn toggle_time_block(&mut self, day: DayOfWeek, name: &str) -> bool {
        let blocks = &mut self.day_mut(day).time_blocks;
        match blocks.iter().position(|b| b.name == name) {
            Some(index) => {
                blocks.remove(index);
                false
            }
            None => {
                blocks.push(TimeBlock::new(name));
                true
            }
        }
    }

    /// Set the override range of an existing block
    pub fn set_custom_range(&mut self, day: DayOfWeek, name: &str, range: &str) -> bool {
        let Some(availability) = self.get_day_mut(day) else {
            return false;
        };
        match availability.time_blocks.iter_mut().find(|b| b.name == name) {
            Some(block) => {
                block.custom_range = Some(range.to_string());
                true
            }
            None => false,
        }
    }

    /// Bring a stored schedule into the shape the editor works with: all
    /// seven days present, and blocks kept only for available days.
    pub fn normalized(&self) -> Self {
        let mut weekly = Self::empty();
        for (day, availability) in self.iter() {
            if availability.available {
                weekly.set_day(day, availability.clone());
            }
        }
        weekly
    }

    /// Weekdays that take bookings, Sunday first
    pub fn available_days(&self) -> Vec<DayOfWeek> {
        self.iter()
            .filter(|(_, availability)| availability.available)
            .map(|(day, _)| day)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_all_days_closed() {
        let weekly = WeeklyAvailability::empty();
        assert_eq!(weekly.iter().count(), 7);
        assert!(weekly.available_days().is_empty());
    }

    #[test]
    fn test_toggle_day() {
        let mut weekly = WeeklyAvailability::empty();
        assert!(weekly.toggle_day(DayOfWeek::Wed));
        assert_eq!(weekly.available_days(), vec![DayOfWeek::Wed]);
        assert!(!weekly.toggle_day(DayOfWeek::Wed));
        assert!(weekly.available_days().is_empty());

        // Unknown days are created on first toggle
        let mut sparse = WeeklyAvailability::default();
        assert!(sparse.toggle_day(DayOfWeek::Sat));
        assert!(sparse.is_available(DayOfWeek::Sat));
    }

    #[test]
    fn test_toggle_time_block() {
        let mut weekly = WeeklyAvailability::empty();
        assert!(weekly.toggle_time_block(DayOfWeek::Mon, PRESET_TIME_BLOCKS[0]));
        assert!(weekly.toggle_time_block(DayOfWeek::Mon, PRESET_TIME_BLOCKS[2]));
        assert_eq!(
            weekly.day(DayOfWeek::Mon).unwrap().time_blocks,
            vec![TimeBlock::new(PRESET_TIME_BLOCKS[0]), TimeBlock::new(PRESET_TIME_BLOCKS[2])]
        );

        assert!(!weekly.toggle_time_block(DayOfWeek::Mon, PRESET_TIME_BLOCKS[0]));
        assert_eq!(
            weekly.day(DayOfWeek::Mon).unwrap().time_blocks,
            vec![TimeBlock::new(PRESET_TIME_BLOCKS[2])]
        );
    }

    #[test]
    fn test_set_custom_range() {
        let mut weekly = WeeklyAvailability::empty();
        weekly.toggle_time_block(DayOfWeek::Tue, PRESET_TIME_BLOCKS[1]);

        assert!(weekly.set_custom_range(DayOfWeek::Tue, PRESET_TIME_BLOCKS[1], "1:00 PM - 3:00 PM"));
        assert_eq!(
            weekly.day(DayOfWeek::Tue).unwrap().time_blocks[0].custom_range.as_deref(),
            Some("1:00 PM - 3:00 PM")
        );

        assert!(!weekly.set_custom_range(DayOfWeek::Tue, "Night (9pm-11pm)", "9pm-10pm"));
        assert!(!WeeklyAvailability::default().set_custom_range(DayOfWeek::Tue, "x", "y"));
    }

    #[test]
    fn test_normalized_drops_blocks_of_closed_days() {
        let stored = WeeklyAvailability::default()
            .with_day(DayOfWeek::Mon, DayAvailability::open(vec![TimeBlock::new(PRESET_TIME_BLOCKS[0])]))
            .with_day(
                DayOfWeek::Tue,
                DayAvailability {
                    available: false,
                    time_blocks: vec![TimeBlock::new(PRESET_TIME_BLOCKS[1])],
                },
            );

        let weekly = stored.normalized();
        assert_eq!(weekly.iter().count(), 7);
        assert_eq!(weekly.available_days(), vec![DayOfWeek::Mon]);
        assert!(weekly.day(DayOfWeek::Tue).unwrap().time_blocks.is_empty());
        assert_eq!(weekly.day(DayOfWeek::Mon), stored.day(DayOfWeek::Mon));
    }
}
