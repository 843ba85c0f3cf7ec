use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One stored guestbook message. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub date: String,
}

impl From<models::message::Model> for Entry {
    fn from(m: models::message::Model) -> Self {
        Self { id: m.id, name: m.name, message: m.message, date: m.date }
    }
}

/// Short human-readable stamp, e.g. `Mar 5, 2026`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Stamp for the current day in the server's local timezone.
pub fn today_stamp() -> String {
    date_stamp(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_stamp_is_short_month_unpadded_day_year() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(date_stamp(d), "Mar 5, 2026");
        let d = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(date_stamp(d), "Dec 31, 2025");
    }

    #[test]
    fn entry_json_shape() {
        let e = Entry { id: 7, name: "Asha".into(), message: "Congrats!".into(), date: "Mar 5, 2026".into() };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, serde_json::json!({"id": 7, "name": "Asha", "message": "Congrats!", "date": "Mar 5, 2026"}));
    }
}
