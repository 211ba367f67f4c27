//! # Collection Trait
//!
//! The seam between the list controller and whatever serves the `/users`
//! resource. The controller only ever sees this trait; the HTTP adapter and the
//! test mock both implement it.

use crate::clients::ClientError;
use crate::model::{User, UserDraft, UserId};
use async_trait::async_trait;

/// Standard CRUD operations on the remote user collection.
///
/// Implementations never retry; every failure is returned to the caller as a
/// single [`ClientError`].
#[async_trait]
pub trait UserCollection: Send + Sync + 'static {
    /// Fetch the whole collection in server order.
    async fn list(&self) -> Result<Vec<User>, ClientError>;

    /// Fetch one record by id.
    async fn get(&self, id: &UserId) -> Result<User, ClientError>;

    /// Create a record from a draft; the server assigns the id.
    async fn create(&self, draft: &UserDraft) -> Result<User, ClientError>;

    /// Replace the editable fields of an existing record.
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, ClientError>;

    /// Remove a record.
    async fn delete(&self, id: &UserId) -> Result<(), ClientError>;
}
