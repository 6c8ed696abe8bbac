use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::meals::{dto::MealInput, repo::MealStore, repo_types::Meal};
use crate::session::SessionId;

/// Process-local store. The backing `Vec` keeps insertion order.
#[derive(Default)]
pub struct InMemoryMealStore {
    meals: RwLock<Vec<Meal>>,
}

impl InMemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned_by(meal: &Meal, session: &SessionId, id: Uuid) -> bool {
    meal.id == id && meal.session_id == session.as_str()
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn list_for_session(&self, session: &SessionId) -> anyhow::Result<Vec<Meal>> {
        let meals = self.meals.read().await;
        Ok(meals
            .iter()
            .filter(|m| m.session_id == session.as_str())
            .cloned()
            .collect())
    }

    async fn find_for_session(
        &self,
        session: &SessionId,
        id: Uuid,
    ) -> anyhow::Result<Option<Meal>> {
        let meals = self.meals.read().await;
        Ok(meals.iter().find(|m| owned_by(m, session, id)).cloned())
    }

    async fn insert(
        &self,
        session: &SessionId,
        id: Uuid,
        input: &MealInput,
    ) -> anyhow::Result<Meal> {
        let mut meals = self.meals.write().await;
        anyhow::ensure!(meals.iter().all(|m| m.id != id), "duplicate meal id {id}");
        let meal = Meal {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            meal_date: input.meal_date,
            meal_time: input.meal_time,
            included_on_diet: input.included_on_diet,
            session_id: session.as_str().to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        meals.push(meal.clone());
        Ok(meal)
    }

    async fn update(
        &self,
        session: &SessionId,
        id: Uuid,
        input: &MealInput,
    ) -> anyhow::Result<bool> {
        let mut meals = self.meals.write().await;
        let Some(meal) = meals.iter_mut().find(|m| owned_by(m, session, id)) else {
            return Ok(false);
        };
        meal.name = input.name.clone();
        meal.description = input.description.clone();
        meal.meal_date = input.meal_date;
        meal.meal_time = input.meal_time;
        meal.included_on_diet = input.included_on_diet;
        Ok(true)
    }

    async fn delete(&self, session: &SessionId, id: Uuid) -> anyhow::Result<bool> {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|m| !owned_by(m, session, id));
        Ok(meals.len() < before)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn input(name: &str, on_diet: bool) -> MealInput {
        MealInput {
            name: name.into(),
            description: "desc".into(),
            meal_date: date!(2024 - 04 - 25),
            meal_time: time!(20:01:00),
            included_on_diet: on_diet,
        }
    }

    fn session(raw: &str) -> SessionId {
        SessionId::new(raw).expect("valid session id")
    }

    #[tokio::test]
    async fn lists_in_insertion_order_and_scoped_by_session() {
        let store = InMemoryMealStore::new();
        let alice = session("alice");
        let bob = session("bob");

        store.insert(&alice, Uuid::new_v4(), &input("first", true)).await.unwrap();
        store.insert(&bob, Uuid::new_v4(), &input("other", true)).await.unwrap();
        store.insert(&alice, Uuid::new_v4(), &input("second", false)).await.unwrap();

        let names: Vec<_> = store
            .list_for_session(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn update_keeps_position_and_identity() {
        let store = InMemoryMealStore::new();
        let alice = session("alice");
        let first = Uuid::new_v4();
        let created = store.insert(&alice, first, &input("first", true)).await.unwrap();
        store.insert(&alice, Uuid::new_v4(), &input("second", true)).await.unwrap();

        assert!(store.update(&alice, first, &input("renamed", false)).await.unwrap());

        let meals = store.list_for_session(&alice).await.unwrap();
        assert_eq!(meals[0].id, first);
        assert_eq!(meals[0].name, "renamed");
        assert!(!meals[0].included_on_diet);
        assert_eq!(meals[0].created_at, created.created_at);
        assert_eq!(meals[0].session_id, "alice");
    }

    #[tokio::test]
    async fn other_sessions_cannot_touch_a_meal() {
        let store = InMemoryMealStore::new();
        let alice = session("alice");
        let mallory = session("mallory");
        let id = Uuid::new_v4();
        store.insert(&alice, id, &input("mine", true)).await.unwrap();

        assert!(store.find_for_session(&mallory, id).await.unwrap().is_none());
        assert!(!store.update(&mallory, id, &input("stolen", false)).await.unwrap());
        assert!(!store.delete(&mallory, id).await.unwrap());

        let meal = store.find_for_session(&alice, id).await.unwrap().unwrap();
        assert_eq!(meal.name, "mine");
        assert!(store.delete(&alice, id).await.unwrap());
        assert!(store.list_for_session(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let store = InMemoryMealStore::new();
        let alice = session("alice");
        let id = Uuid::new_v4();
        store.insert(&alice, id, &input("a", true)).await.unwrap();
        assert!(store.insert(&alice, id, &input("b", true)).await.is_err());
    }
}
