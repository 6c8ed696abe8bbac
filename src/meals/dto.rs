use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::meals::{metrics::DietMetrics, repo_types::Meal};

/// Body of `POST /meals` and `PUT /meals/:id`, as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct MealRequest {
    pub name: String,
    pub description: String,
    pub meal_date: String,
    pub meal_time: String,
    pub included_on_diet: bool,
}

/// A [`MealRequest`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub meal_date: Date,
    pub meal_time: Time,
    pub included_on_diet: bool,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    // absent meals serialize as `{}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: DietMetrics,
}
