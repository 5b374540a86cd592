use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Gift, GiftCriteria, User};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Gift not found: {0}")]
    GiftNotFound(Uuid),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),
}

/// PostgreSQL client for the gift catalog and admin accounts
///
/// The catalog is the source of truth for suggestions: `list_gifts`
/// returns rows in insertion order, and the matcher preserves that
/// order in its results.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Load the whole catalog in insertion order
    pub async fn list_gifts(&self) -> Result<Vec<Gift>, StoreError> {
        let query = r#"
            SELECT id, name, description, price, image, criteria, created_at
            FROM gifts
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let gifts: Vec<Gift> = rows.iter().map(gift_from_row).collect();

        tracing::debug!("Loaded {} gifts from catalog", gifts.len());

        Ok(gifts)
    }

    /// Fetch a single gift by id
    pub async fn get_gift(&self, id: Uuid) -> Result<Gift, StoreError> {
        let query = r#"
            SELECT id, name, description, price, image, criteria, created_at
            FROM gifts
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(gift_from_row(&row)),
            None => Err(StoreError::GiftNotFound(id)),
        }
    }

    /// Insert a new gift into the catalog
    pub async fn insert_gift(&self, gift: &Gift) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO gifts (id, name, description, price, image, criteria, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()))
        "#;

        sqlx::query(query)
            .bind(gift.id)
            .bind(&gift.name)
            .bind(&gift.description)
            .bind(gift.price)
            .bind(&gift.image)
            .bind(Json(&gift.criteria))
            .bind(gift.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted gift {} ({})", gift.id, gift.name);

        Ok(())
    }

    /// Delete a gift, returning its stored image name (if any) so the
    /// caller can remove the file as well
    pub async fn delete_gift(&self, id: Uuid) -> Result<Option<String>, StoreError> {
        let query = r#"
            DELETE FROM gifts
            WHERE id = $1
            RETURNING image
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.get("image")),
            None => Err(StoreError::GiftNotFound(id)),
        }
    }

    /// Attach an image file name to an existing gift
    pub async fn set_gift_image(&self, id: Uuid, image: &str) -> Result<(), StoreError> {
        let query = r#"
            UPDATE gifts
            SET image = $2
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(image)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::GiftNotFound(id));
        }

        Ok(())
    }

    /// Create an admin account
    ///
    /// A duplicate username surfaces as `UsernameTaken` rather than a
    /// raw database error so the route layer can answer with a 409.
    pub async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO users (username, password_hash, salt, created_at)
            VALUES ($1, $2, $3, $4)
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.salt)
            .bind(user.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::info!("Created account for {}", user.username);
                Ok(())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::UsernameTaken(user.username.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Look up an account by username
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = r#"
            SELECT username, password_hash, salt, created_at
            FROM users
            WHERE username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            username: row.get("username"),
            password_hash: row.get("password_hash"),
            salt: row.get("salt"),
            created_at: row.get("created_at"),
        }))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn gift_from_row(row: &PgRow) -> Gift {
    Gift {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        image: row.get("image"),
        criteria: criteria_from_json(row.get("criteria")),
        created_at: row.get("created_at"),
    }
}

/// Decode stored criteria, treating anything unreadable as unconstrained
/// so one bad row never breaks the whole catalog.
fn criteria_from_json(value: Option<serde_json::Value>) -> GiftCriteria {
    match value {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!("Ignoring malformed gift criteria: {}", err);
            GiftCriteria::default()
        }),
        None => GiftCriteria::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_criteria_from_json_parses_stored_shape() {
        let value = json!({
            "genders": ["female"],
            "ageMin": 18,
            "ageMax": 25,
            "nationalities": ["japanese"],
            "jobs": []
        });

        let criteria = criteria_from_json(Some(value));

        assert_eq!(criteria.genders, vec!["female"]);
        assert_eq!(criteria.age_min, Some(18));
        assert_eq!(criteria.age_max, Some(25));
        assert_eq!(criteria.nationalities, vec!["japanese"]);
        assert!(criteria.jobs.is_empty());
    }

    #[test]
    fn test_criteria_from_json_defaults_when_missing() {
        let criteria = criteria_from_json(None);
        assert!(criteria.genders.is_empty());
        assert!(criteria.age_min.is_none());
    }

    #[test]
    fn test_criteria_from_json_degrades_malformed_to_unconstrained() {
        let criteria = criteria_from_json(Some(json!("not an object")));
        assert!(criteria.genders.is_empty());
        assert!(criteria.age_min.is_none());
        assert!(criteria.age_max.is_none());
        assert!(criteria.nationalities.is_empty());
        assert!(criteria.jobs.is_empty());
    }

    #[test]
    fn test_criteria_from_json_accepts_empty_object() {
        let criteria = criteria_from_json(Some(json!({})));
        assert!(criteria.genders.is_empty());
    }
}
