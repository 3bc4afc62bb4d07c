//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a post. `author` may be omitted or blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Request to replace a post's title, author and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub content: String,
}

/// Query string of the post listing.
///
/// `page` stays raw text so a malformed value falls back to the first page
/// instead of rejecting the request. `search` is the legacy name of
/// `search_query`; when both are sent `search_query` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<String>,
    pub search_query: Option<String>,
    pub search: Option<String>,
}

impl ListPostsQuery {
    /// Requested page: 1 when absent or not an integer, at least 1 otherwise.
    pub fn page_number(&self) -> u64 {
        match self.page.as_deref().map(str::trim).map(str::parse::<i128>) {
            Some(Ok(n)) => u64::try_from(n.max(1)).unwrap_or(u64::MAX),
            _ => 1,
        }
    }

    pub fn search_term(self) -> Option<String> {
        self.search_query.or(self.search)
    }
}

/// A single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Navigation metadata of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse {
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u64>,
}

/// One page of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: PaginationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// Confirmation of a deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i32,
}
