//! Repository Module
//!
//! The member table is the single source of truth; nothing above this layer
//! keeps its own copy of member rows.

pub mod member;

pub use member::SqliteMemberRepository;

use async_trait::async_trait;
use shared::models::{Member, MemberUpdate, NewMember};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored row no longer decodes into a valid member
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Member storage contract
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members, newest first
    async fn find_all(&self) -> RepoResult<Vec<Member>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>>;

    /// Insert and return the stored member with its assigned id
    async fn create(&self, data: NewMember) -> RepoResult<Member>;

    /// Apply the present fields of `data`; `NotFound` if `id` is unknown
    async fn update(&self, id: i64, data: MemberUpdate) -> RepoResult<Member>;

    /// Permanently remove; `NotFound` if `id` is unknown
    async fn delete(&self, id: i64) -> RepoResult<()>;
}
