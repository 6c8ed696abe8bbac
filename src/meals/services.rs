use tracing::debug;
use uuid::Uuid;

use crate::meals::{
    dto::MealInput,
    metrics::{self, DietMetrics},
    ordering::MealOrder,
    repo::MealStore,
    repo_types::Meal,
};
use crate::session::SessionId;

/// Reads one snapshot of the session's meals and computes its metrics.
pub async fn metrics_for_session(
    store: &dyn MealStore,
    session: &SessionId,
    order: MealOrder,
) -> anyhow::Result<DietMetrics> {
    let mut meals = store.list_for_session(session).await?;
    order.arrange(&mut meals);
    let metrics = metrics::compute(&meals);
    debug!(session = %session, ?order, ?metrics, "metrics computed");
    Ok(metrics)
}

pub async fn create_meal(
    store: &dyn MealStore,
    session: &SessionId,
    input: &MealInput,
) -> anyhow::Result<Meal> {
    let id = Uuid::new_v4();
    store.insert(session, id, input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::memory::InMemoryMealStore;
    use time::macros::{date, time};

    fn meal(day: time::Date, at: time::Time, on_diet: bool) -> MealInput {
        MealInput {
            name: "meal".into(),
            description: String::new(),
            meal_date: day,
            meal_time: at,
            included_on_diet: on_diet,
        }
    }

    #[tokio::test]
    async fn empty_session_yields_zeros() {
        let store = InMemoryMealStore::new();
        let session = SessionId::generate();
        let metrics = metrics_for_session(&store, &session, MealOrder::Insertion)
            .await
            .unwrap();
        assert_eq!(metrics, DietMetrics::default());
    }

    /// Logged out of order: the late-logged breakfast falls between the two dinners.
    async fn backfilled_store(session: &SessionId) -> InMemoryMealStore {
        let store = InMemoryMealStore::new();
        for input in [
            meal(date!(2024 - 04 - 25), time!(20:00), true),
            meal(date!(2024 - 04 - 26), time!(20:00), true),
            meal(date!(2024 - 04 - 26), time!(8:00), false),
        ] {
            create_meal(&store, session, &input).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insertion_order_streak_follows_logging_order() {
        let session = SessionId::generate();
        let store = backfilled_store(&session).await;
        let metrics = metrics_for_session(&store, &session, MealOrder::Insertion)
            .await
            .unwrap();
        assert_eq!(metrics.total_meals, 3);
        assert_eq!(metrics.best_diet_streak, 2);
    }

    #[tokio::test]
    async fn chronological_order_streak_follows_meal_time() {
        let session = SessionId::generate();
        let store = backfilled_store(&session).await;
        let metrics = metrics_for_session(&store, &session, MealOrder::Chronological)
            .await
            .unwrap();
        assert_eq!(metrics.total_meals, 3);
        assert_eq!(metrics.on_diet_meals, 2);
        assert_eq!(metrics.best_diet_streak, 1);
    }
}
