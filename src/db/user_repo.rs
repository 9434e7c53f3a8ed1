use sqlx::SqlitePool;

use super::format_timestamp;
use crate::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

#[cfg(test)]
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    created_at: String,
}

#[cfg(test)]
impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        use super::{parse_timestamp, parse_uuid};

        Ok(User {
            id: parse_uuid(&row.id)?,
            name: row.name,
            email: row.email,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(format_timestamp(&user.created_at))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }
}
