//! Remote endpoint abstraction and error taxonomy.

/// HTTP implementation over one REST collection resource.
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    types::{Gender, UserId},
    user::UserRecord,
};

/// Classified failure surfaced by every API operation.
///
/// Transport exceptions never escape raw; each failure maps to exactly one of
/// these kinds so callers can react without inspecting status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable, connection refused, or the request timed out.
    #[error("service unavailable: {0}")]
    Unavailable(String),
    /// Payload rejected client- or server-side (400 or 422).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Missing or invalid credentials (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Authenticated but not permitted (403).
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Identifier absent server-side (404).
    #[error("not found: {0}")]
    NotFound(String),
    /// Uniqueness violation, e.g. duplicate email (409).
    #[error("conflict: {0}")]
    Conflict(String),
    /// Any 5xx response.
    #[error("server error ({status}): {message}")]
    ServerError {
        /// Raw HTTP status.
        status: u16,
        /// Response body or status text.
        message: String,
    },
    /// Unclassified response, carrying the raw status.
    #[error("unexpected status {status}: {message}")]
    Unknown {
        /// Raw HTTP status.
        status: u16,
        /// Response body or status text.
        message: String,
    },
}

impl ApiError {
    /// Classifies a definitive HTTP status into an error kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => Self::InvalidInput(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            500..=599 => Self::ServerError { status, message },
            _ => Self::Unknown { status, message },
        }
    }

    /// Whether an idempotent operation may retry after this failure.
    ///
    /// Transport failures and 5xx are retryable; definitive 4xx are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::ServerError { .. })
    }
}

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Create payload: a record without identifier or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Age in years.
    pub age: u32,
    /// Validated gender value.
    pub gender: Gender,
    /// Active flag, true for new records.
    pub is_active: bool,
}

/// Full-replacement update payload addressed by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// Identifier of the record to replace.
    pub id: UserId,
    /// Replacement display name.
    pub name: String,
    /// Replacement email address.
    pub email: String,
    /// Replacement age in years.
    pub age: u32,
    /// Replacement gender value.
    pub gender: Gender,
}

/// One network round trip per CRUD intent against the user collection.
///
/// Implementations classify every failure into [`ApiError`]; only `list` is
/// idempotent and may retry internally.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Retrieves the full collection, optionally narrowed by a server-side
    /// free-text filter.
    async fn list(&self, q: Option<&str>) -> ApiResult<Vec<UserRecord>>;

    /// Submits a new record; the server assigns identifier and timestamps.
    async fn create(&self, user: NewUser) -> ApiResult<UserRecord>;

    /// Replaces a record by identifier; the server refreshes the update
    /// timestamp.
    async fn update(&self, user: UserUpdate) -> ApiResult<UserRecord>;

    /// Removes a record by identifier.
    async fn delete(&self, id: UserId) -> ApiResult<()>;
}
