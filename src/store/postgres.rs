//! `PostgreSQL` contact store.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{ContactFilter, ContactStore, StoreError};
use crate::model::{Contact, NewContact};
use crate::pagination::PageRequest;

/// Contact store backed by the `contacts` table.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and wrap it in a store.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(
        database_url: &SecretString,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations under `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::migrate::MigrateError` if a migration fails.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let row = sqlx::query_as::<_, Contact>(
            r"
            INSERT INTO contacts (external_id, phone_number, date_created, date_updated)
            VALUES ($1, $2, $3, $4)
            RETURNING id, external_id, phone_number, date_created, date_updated
            ",
        )
        .bind(contact.external_id)
        .bind(contact.phone_number)
        .bind(contact.date_created)
        .bind(contact.date_updated)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn query(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError> {
        let limit = i64::from(page.page_size());
        let offset = page.row_offset();

        let rows = match filter {
            ContactFilter::All => {
                sqlx::query_as::<_, Contact>(
                    r"
                    SELECT id, external_id, phone_number, date_created, date_updated
                    FROM contacts
                    ORDER BY id
                    LIMIT $1 OFFSET $2
                    ",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            ContactFilter::ExternalIdAndPhone {
                external_id,
                phone_number,
            } => {
                sqlx::query_as::<_, Contact>(
                    r"
                    SELECT id, external_id, phone_number, date_created, date_updated
                    FROM contacts
                    WHERE external_id = $1 AND phone_number = $2
                    ORDER BY id
                    LIMIT $3 OFFSET $4
                    ",
                )
                .bind(external_id)
                .bind(phone_number)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
