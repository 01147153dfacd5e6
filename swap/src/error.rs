use thiserror::Error;

/// Errors raised around the matching engine: member names, storage and
/// snapshot files. The engine itself cannot fail.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("member name must not be empty")]
    EmptyMemberName,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored item {value} for {member} is not a valid item number")]
    InvalidStoredItem { member: String, value: i64 },

    #[error("item {value} for {member} is too large to store")]
    ItemOutOfRange { member: String, value: u64 },

    #[error("snapshot file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwapError>;
