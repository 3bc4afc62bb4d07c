use async_trait::async_trait;

use crate::domain::{Page, Post, PostFields, PostQuery};
use crate::error::RepoError;

/// Post repository.
///
/// Implementations own timestamps: `insert` stamps `created_at` and
/// `updated_at` with the same instant, `update` moves only `updated_at`.
/// Every mutation commits fully or not at all.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// One page of posts, newest first (`created_at` desc, then `id` desc),
    /// filtered to titles or contents containing the search term.
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Insert a new post and return it with its assigned id.
    async fn insert(&self, fields: PostFields) -> Result<Post, RepoError>;

    /// Replace the mutable fields of an existing post.
    ///
    /// Returns [`RepoError::NotFound`] if the id does not exist.
    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError>;

    /// Delete a post permanently.
    ///
    /// Returns [`RepoError::NotFound`] if the id does not exist.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
