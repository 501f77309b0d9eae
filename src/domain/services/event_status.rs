use chrono::{DateTime, Utc};
use crate::domain::models::event::{Event, EventStatus};

/// Derives the temporal status of an event. Status is never stored: there is
/// no scheduler flipping events over, so every read path recomputes it
/// against the current clock.
pub fn derive_status(date: DateTime<Utc>, now: DateTime<Utc>) -> EventStatus {
    if date > now {
        EventStatus::Upcoming
    } else {
        EventStatus::Completed
    }
}

pub fn status_of(event: &Event) -> EventStatus {
    derive_status(event.date, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn future_event_is_upcoming() {
        let now = Utc::now();
        assert_eq!(derive_status(now + Duration::hours(1), now), EventStatus::Upcoming);
    }

    #[test]
    fn past_event_is_completed() {
        let now = Utc::now();
        assert_eq!(derive_status(now - Duration::seconds(1), now), EventStatus::Completed);
    }

    #[test]
    fn event_dated_exactly_now_is_completed() {
        let now = Utc::now();
        assert_eq!(derive_status(now, now), EventStatus::Completed);
    }
}
