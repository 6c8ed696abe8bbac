use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

time::serde::format_description!(meal_date_format, Date, "[year]-[month]-[day]");

/// `HH:MM:SS`, plus a millisecond or microsecond fraction when one is set.
mod meal_time_format {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Time};

    use crate::meals::validation::parse_time;

    const WHOLE: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
    const MILLIS: &[FormatItem<'static>] =
        format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
    const MICROS: &[FormatItem<'static>] =
        format_description!("[hour]:[minute]:[second].[subsecond digits:6]");

    pub fn serialize<S: Serializer>(value: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let format = match value.nanosecond() {
            0 => WHOLE,
            n if n % 1_000_000 == 0 => MILLIS,
            _ => MICROS,
        };
        let text = value.format(format).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).ok_or_else(|| D::Error::custom(format!("invalid meal time {raw:?}")))
    }
}

/// Meal record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "meal_date_format")]
    pub meal_date: Date,
    #[serde(with = "meal_time_format")]
    pub meal_time: Time,
    pub included_on_diet: bool,
    pub session_id: String, // owning session, never reassigned
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    fn meal_at(meal_time: Time) -> Meal {
        Meal {
            id: Uuid::nil(),
            name: "Breakfast".into(),
            description: String::new(),
            meal_date: date!(2024 - 04 - 25),
            meal_time,
            included_on_diet: true,
            session_id: "s".into(),
            created_at: datetime!(2024-04-25 7:31 UTC),
        }
    }

    #[test]
    fn meal_time_keeps_its_fraction() {
        for (at, text) in [
            (time!(7:30:15), "07:30:15"),
            (time!(7:30:15.25), "07:30:15.250"),
            (time!(7:30:15.000_125), "07:30:15.000125"),
        ] {
            let json = serde_json::to_value(meal_at(at)).unwrap();
            assert_eq!(json["meal_time"], text);
            let back: Meal = serde_json::from_value(json).unwrap();
            assert_eq!(back.meal_time, at);
        }
    }
}
