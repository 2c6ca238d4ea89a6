//! PostgreSQL storage adapter (sqlx).
//!
//! This crate implements the `gsb-core` GroupStore port over a bounded
//! connection pool. Every method checks a connection out for exactly one
//! statement; the pool takes it back when the future completes or fails.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use gsb_core::{config::Config, domain::GroupEntry, errors::Error, ports::GroupStore, Result};

const CREATE_GROUPS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS groups (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        link TEXT NOT NULL
    )
"#;

const INSERT_GROUP: &str = "INSERT INTO groups (name, link) VALUES ($1, $2)";

const LIST_RECENT: &str = "SELECT name, link FROM groups ORDER BY id DESC LIMIT $1";

// `%`, `_` and `\` inside the term keep their ILIKE meaning.
const SEARCH_BY_NAME: &str =
    "SELECT name, link FROM groups WHERE name ILIKE $1 ORDER BY id DESC LIMIT $2";

#[derive(sqlx::FromRow)]
struct GroupRow {
    name: String,
    link: String,
}

impl From<GroupRow> for GroupEntry {
    fn from(row: GroupRow) -> Self {
        GroupEntry::new(row.name, row.link)
    }
}

#[derive(Clone)]
pub struct PgGroupStore {
    pool: PgPool,
}

impl PgGroupStore {
    /// Open the pool and verify the database is reachable.
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.database_max_connections)
            .acquire_timeout(cfg.database_acquire_timeout)
            .connect(&cfg.database_url)
            .await
            .map_err(map_err)?;

        tracing::info!(
            max_connections = cfg.database_max_connections,
            "postgres pool ready"
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl GroupStore for PgGroupStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_GROUPS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn insert_group(&self, name: &str, link: &str) -> Result<()> {
        if name.trim().is_empty() || link.trim().is_empty() {
            return Err(Error::Validation(
                "group name and link must be non-empty".to_string(),
            ));
        }

        sqlx::query(INSERT_GROUP)
            .bind(name)
            .bind(link)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<GroupEntry>> {
        let rows = sqlx::query_as::<_, GroupRow>(LIST_RECENT)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(GroupEntry::from).collect())
    }

    async fn search_by_name(&self, term: &str, limit: u32) -> Result<Vec<GroupEntry>> {
        let rows = sqlx::query_as::<_, GroupRow>(SEARCH_BY_NAME)
            .bind(contains_pattern(term))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(GroupEntry::from).collect())
    }
}

fn contains_pattern(term: &str) -> String {
    format!("%{term}%")
}

fn map_err(e: sqlx::Error) -> Error {
    Error::Storage(format!("postgres error: {e}"))
}
