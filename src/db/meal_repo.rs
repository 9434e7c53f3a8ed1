use sqlx::SqlitePool;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::models::Meal;

/// Meal storage. Every read and write is scoped to an owner.
#[derive(Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MealRow {
    id: String,
    name: String,
    description: String,
    created_at: String,
    inside_diet: bool,
    owner_id: String,
}

impl TryFrom<MealRow> for Meal {
    type Error = sqlx::Error;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        Ok(Meal {
            id: parse_uuid(&row.id)?,
            name: row.name,
            description: row.description,
            created_at: parse_timestamp(&row.created_at)?,
            inside_diet: row.inside_diet,
            owner_id: row.owner_id,
        })
    }
}

impl MealRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, meal: &Meal) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, name, description, created_at, inside_diet, owner_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(meal.id.to_string())
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(format_timestamp(&meal.created_at))
        .bind(meal.inside_diet)
        .bind(&meal.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All meals of `owner_id` in creation order.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Meal>, sqlx::Error> {
        let rows: Vec<MealRow> =
            sqlx::query_as("SELECT * FROM meals WHERE owner_id = ? ORDER BY created_at, rowid")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Meal::try_from).collect()
    }

    pub async fn get_for_owner(
        &self,
        id: Uuid,
        owner_id: &str,
    ) -> Result<Option<Meal>, sqlx::Error> {
        let row: Option<MealRow> =
            sqlx::query_as("SELECT * FROM meals WHERE id = ? AND owner_id = ?")
                .bind(id.to_string())
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Meal::try_from).transpose()
    }

    /// Writes the editable fields back. Returns false if no row matched
    /// both id and owner.
    pub async fn update(&self, meal: &Meal) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE meals
            SET name = ?, description = ?, inside_diet = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.inside_diet)
        .bind(meal.id.to_string())
        .bind(&meal.owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_for_owner(&self, id: Uuid, owner_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meals WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
