use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::{dto::MealInput, repo_types::Meal};
use crate::session::SessionId;

/// Durable storage of meals, always scoped by owning session.
///
/// `list_for_session` returns meals in insertion order; the streak metric is
/// defined relative to that order.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn list_for_session(&self, session: &SessionId) -> anyhow::Result<Vec<Meal>>;

    async fn find_for_session(&self, session: &SessionId, id: Uuid)
        -> anyhow::Result<Option<Meal>>;

    async fn insert(&self, session: &SessionId, id: Uuid, input: &MealInput)
        -> anyhow::Result<Meal>;

    /// Returns `false` when the session owns no meal with this id.
    async fn update(&self, session: &SessionId, id: Uuid, input: &MealInput)
        -> anyhow::Result<bool>;

    /// Returns `false` when the session owns no meal with this id.
    async fn delete(&self, session: &SessionId, id: Uuid) -> anyhow::Result<bool>;

    async fn close(&self);
}

#[derive(Clone)]
pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn list_for_session(&self, session: &SessionId) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, meal_date, meal_time, included_on_diet,
                   session_id, created_at
              FROM meals
             WHERE session_id = $1
             ORDER BY seq ASC
            "#,
        )
        .bind(session.as_str())
        .fetch_all(&self.db)
        .await
        .context("list meals for session")?;
        Ok(rows)
    }

    async fn find_for_session(
        &self,
        session: &SessionId,
        id: Uuid,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, meal_date, meal_time, included_on_diet,
                   session_id, created_at
              FROM meals
             WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(session.as_str())
        .fetch_optional(&self.db)
        .await
        .context("find meal for session")?;
        Ok(meal)
    }

    async fn insert(
        &self,
        session: &SessionId,
        id: Uuid,
        input: &MealInput,
    ) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, name, description, meal_date, meal_time,
                               included_on_diet, session_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, meal_date, meal_time, included_on_diet,
                      session_id, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.meal_date)
        .bind(input.meal_time)
        .bind(input.included_on_diet)
        .bind(session.as_str())
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Ok(meal)
    }

    async fn update(
        &self,
        session: &SessionId,
        id: Uuid,
        input: &MealInput,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE meals
               SET name = $3, description = $4, meal_date = $5, meal_time = $6,
                   included_on_diet = $7
             WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(session.as_str())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.meal_date)
        .bind(input.meal_time)
        .bind(input.included_on_diet)
        .execute(&self.db)
        .await
        .context("update meal")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, session: &SessionId, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND session_id = $2")
            .bind(id)
            .bind(session.as_str())
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
