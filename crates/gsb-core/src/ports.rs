use async_trait::async_trait;

use crate::{
    domain::{ChatId, GroupEntry},
    Result,
};

/// Hexagonal port for the group directory storage.
///
/// Each call is one unit of work: implementations acquire a store handle, run
/// a single statement and release the handle before returning, on error paths
/// too. Writes are committed before `insert_group` returns.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Create the `groups` table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<()>;

    /// Append one entry. Both `name` and `link` must be non-empty.
    async fn insert_group(&self, name: &str, link: &str) -> Result<()>;

    /// Up to `limit` entries, most recently inserted first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<GroupEntry>>;

    /// Up to `limit` entries whose name contains `term` case-insensitively,
    /// most recently inserted first.
    async fn search_by_name(&self, term: &str, limit: u32) -> Result<Vec<GroupEntry>>;
}

/// Hexagonal port for outbound chat messages.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Send a plain-text message. No markup is interpreted.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
