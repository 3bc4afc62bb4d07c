use std::sync::Arc;

use crate::domain::{Page, Post, PostDraft, PostQuery};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Post use cases: validation in front of the repository, and mapping of
/// repository failures onto [`DomainError`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// List one page of posts, optionally filtered by a search term.
    pub async fn list(&self, query: &PostQuery) -> Result<Page<Post>, DomainError> {
        tracing::debug!(page = query.page(), search = ?query.search(), "Listing posts");
        Ok(self.repo.list(query).await?)
    }

    /// Fetch a single post.
    pub async fn get(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Create a post. A missing or blank author is stored as "anonymous".
    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let fields = draft.validate()?;
        let post = self.repo.insert(fields).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Replace title, author and content of an existing post.
    pub async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, DomainError> {
        let fields = draft.validate()?;
        let post = self
            .repo
            .update(id, fields)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;
        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    /// Delete a post permanently.
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn not_found_or_storage(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::Storage(other),
    }
}
