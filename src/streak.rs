use crate::models::{StreakData, StreakResponse};
use crate::storage::Key;
use chrono::{Days, Local, NaiveDate};

pub const STREAK_KEY: Key<StreakData> = Key::new("intambwe-streak-data");

impl StreakData {
    pub fn check_in(&self) -> StreakData {
        self.check_in_at(today())
    }

    /// Same-day check-ins return the record unchanged. A check-in that does not
    /// follow yesterday's restarts the streak at one.
    pub fn check_in_at(&self, today: NaiveDate) -> StreakData {
        let today_key = date_key(today);
        if self.last_check_in.as_deref() == Some(today_key.as_str()) {
            return self.clone();
        }

        let followed_yesterday = today
            .checked_sub_days(Days::new(1))
            .map(date_key)
            .is_some_and(|yesterday| self.last_check_in.as_deref() == Some(yesterday.as_str()));

        let count = if followed_yesterday {
            self.count.saturating_add(1)
        } else {
            1
        };

        StreakData {
            count,
            last_check_in: Some(today_key),
        }
    }

    pub fn is_checked_in_at(&self, today: NaiveDate) -> bool {
        self.last_check_in.as_deref() == Some(date_key(today).as_str())
    }
}

pub fn to_response(streak: &StreakData) -> StreakResponse {
    to_response_at(today(), streak)
}

pub fn to_response_at(today: NaiveDate, streak: &StreakData) -> StreakResponse {
    StreakResponse {
        count: streak.count,
        last_check_in: streak.last_check_in.clone(),
        checked_in_today: streak.is_checked_in_at(today),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_check_in_starts_at_one() {
        let streak = StreakData::default().check_in_at(day(2026, 1, 5));
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_check_in.as_deref(), Some("2026-01-05"));
    }

    #[test]
    fn consecutive_days_increment_by_one() {
        let mut streak = StreakData::default();
        for (offset, expected) in (0..4).zip(1..) {
            streak = streak.check_in_at(day(2026, 2, 27) + Days::new(offset));
            assert_eq!(streak.count, expected);
        }
        assert_eq!(streak.last_check_in.as_deref(), Some("2026-03-02"));
    }

    #[test]
    fn same_day_check_in_is_idempotent() {
        let first = StreakData {
            count: 4,
            last_check_in: Some("2026-01-04".into()),
        }
        .check_in_at(day(2026, 1, 5));
        let second = first.check_in_at(day(2026, 1, 5));

        assert_eq!(first.count, 5);
        assert_eq!(second, first);
    }

    #[test]
    fn gap_resets_to_one() {
        let streak = StreakData {
            count: 12,
            last_check_in: Some("2026-01-03".into()),
        };
        let after_gap = streak.check_in_at(day(2026, 1, 5));
        assert_eq!(after_gap.count, 1);
        assert_eq!(after_gap.last_check_in.as_deref(), Some("2026-01-05"));
    }

    #[test]
    fn clock_rollback_resets_to_one() {
        let streak = StreakData {
            count: 3,
            last_check_in: Some("2026-01-10".into()),
        };
        assert_eq!(streak.check_in_at(day(2026, 1, 5)).count, 1);
    }

    #[test]
    fn checked_in_today_follows_the_calendar() {
        let streak = StreakData::default().check_in_at(day(2026, 1, 5));
        assert!(to_response_at(day(2026, 1, 5), &streak).checked_in_today);
        assert!(!to_response_at(day(2026, 1, 6), &streak).checked_in_today);
    }

    #[test]
    fn check_in_uses_local_today() {
        let streak = StreakData::default().check_in();
        assert_eq!(streak.count, 1);
        assert!(streak.is_checked_in_at(today()));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(StreakData::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 0, "lastCheckIn": null }));
    }
}
