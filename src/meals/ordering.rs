use std::str::FromStr;

use crate::meals::repo_types::Meal;

/// Order in which a session's meals are walked when computing streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MealOrder {
    /// Store order, i.e. the order meals were logged.
    #[default]
    Insertion,
    /// By meal date then meal time; ties keep store order.
    Chronological,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown meal order {0:?}, expected \"insertion\" or \"chronological\"")]
pub struct UnknownMealOrder(String);

impl FromStr for MealOrder {
    type Err = UnknownMealOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(Self::Insertion),
            "chronological" => Ok(Self::Chronological),
            _ => Err(UnknownMealOrder(s.to_owned())),
        }
    }
}

impl MealOrder {
    pub fn arrange(self, meals: &mut [Meal]) {
        match self {
            MealOrder::Insertion => {}
            // stable sort
            MealOrder::Chronological => meals.sort_by_key(|m| (m.meal_date, m.meal_time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("insertion".parse::<MealOrder>().unwrap(), MealOrder::Insertion);
        assert_eq!(
            " Chronological ".parse::<MealOrder>().unwrap(),
            MealOrder::Chronological
        );
        assert!("random".parse::<MealOrder>().is_err());
    }
}
