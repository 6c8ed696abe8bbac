//! Fallible parsing of client input into typed values.
//!
//! Every check runs before the store is touched. Body checks collect all
//! issues instead of stopping at the first one.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, Date, Time};
use uuid::Uuid;

use super::dto::{MealInput, MealRequest};

pub const MAX_NAME_LEN: usize = 30;
pub const MAX_DESCRIPTION_LEN: usize = 100;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
    // postgres TIME keeps microseconds, so longer fractions would not round-trip
    static ref TIME_RE: Regex = Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,6})?$").unwrap();
}

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const TIME_FRACTION_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed on {}", fields(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn fields(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.field)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field,
                message: message.into(),
            }],
        }
    }
}

impl MealRequest {
    pub fn parse(self) -> Result<MealInput, ValidationError> {
        let mut issues = Vec::new();

        if self.name.chars().count() > MAX_NAME_LEN {
            issues.push(FieldIssue {
                field: "name",
                message: format!("Must be {MAX_NAME_LEN} or fewer characters long"),
            });
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            issues.push(FieldIssue {
                field: "description",
                message: format!("Must be {MAX_DESCRIPTION_LEN} or fewer characters long"),
            });
        }

        let meal_date = parse_date(&self.meal_date);
        if meal_date.is_none() {
            issues.push(FieldIssue {
                field: "meal_date",
                message: "Invalid date string!".into(),
            });
        }
        let meal_time = parse_time(&self.meal_time);
        if meal_time.is_none() {
            issues.push(FieldIssue {
                field: "meal_time",
                message: "Invalid time string!".into(),
            });
        }

        match (meal_date, meal_time) {
            (Some(meal_date), Some(meal_time)) if issues.is_empty() => Ok(MealInput {
                name: self.name,
                description: self.description,
                meal_date,
                meal_time,
                included_on_diet: self.included_on_diet,
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}

pub fn parse_meal_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::single("id", "Invalid uuid"))
}

/// Plain `YYYY-MM-DD`; signed or expanded years are rejected.
pub(crate) fn parse_date(raw: &str) -> Option<Date> {
    if !DATE_RE.is_match(raw) {
        return None;
    }
    Date::parse(raw, DATE_FORMAT).ok()
}

/// `HH:MM:SS` with up to six fractional digits.
pub(crate) fn parse_time(raw: &str) -> Option<Time> {
    if !TIME_RE.is_match(raw) {
        return None;
    }
    Time::parse(raw, TIME_FORMAT)
        .or_else(|_| Time::parse(raw, TIME_FRACTION_FORMAT))
        .ok()
}
