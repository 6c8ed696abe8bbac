use serde::Serialize;

use crate::meals::repo_types::Meal;

/// Anything that can say whether it was eaten on the diet.
pub trait DietEntry {
    fn included_on_diet(&self) -> bool;
}

impl DietEntry for bool {
    fn included_on_diet(&self) -> bool {
        *self
    }
}

impl DietEntry for Meal {
    fn included_on_diet(&self) -> bool {
        self.included_on_diet
    }
}

impl<T: DietEntry + ?Sized> DietEntry for &T {
    fn included_on_diet(&self) -> bool {
        (**self).included_on_diet()
    }
}

/// Diet adherence statistics for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DietMetrics {
    #[serde(rename = "numberOfMeals")]
    pub total_meals: usize,
    #[serde(rename = "numberOfDietMeals")]
    pub on_diet_meals: usize,
    #[serde(rename = "numberOfOutsideDietMeals")]
    pub off_diet_meals: usize,
    /// Longest run of consecutive on-diet meals, in the order given.
    #[serde(rename = "bestDietSequence")]
    pub best_diet_streak: usize,
}

/// Computes adherence metrics over `meals` in iteration order.
///
/// An empty sequence yields all zeros.
pub fn compute<I>(meals: I) -> DietMetrics
where
    I: IntoIterator,
    I::Item: DietEntry,
{
    let mut total = 0;
    let mut on_diet = 0;
    let mut current_run = 0;
    let mut best = 0;

    for meal in meals {
        total += 1;
        if meal.included_on_diet() {
            on_diet += 1;
            current_run += 1;
        } else {
            best = best.max(current_run);
            current_run = 0;
        }
    }
    // a run reaching the end of the sequence never hits the reset branch
    best = best.max(current_run);

    DietMetrics {
        total_meals: total,
        on_diet_meals: on_diet,
        off_diet_meals: total - on_diet,
        best_diet_streak: best,
    }
}
