use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Stored author when none is given.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum author length, in characters.
pub const AUTHOR_MAX_CHARS: usize = 50;

/// Post entity - a single blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Timestamp to store on the next successful edit.
    ///
    /// Never moves backwards, so `updated_at >= created_at` holds even if the
    /// wall clock steps back between writes.
    pub fn next_updated_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.updated_at)
    }
}

/// Unvalidated input for creating or editing a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub author: Option<String>,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            content: content.into(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Check required fields and limits, defaulting a blank author.
    pub fn validate(self) -> Result<PostFields, DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("Content is required".to_string()));
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "Title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }

        let author = match self.author {
            Some(author) if !author.trim().is_empty() => author,
            _ => ANONYMOUS_AUTHOR.to_string(),
        };
        if author.chars().count() > AUTHOR_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "Author must be at most {AUTHOR_MAX_CHARS} characters"
            )));
        }

        Ok(PostFields {
            title: self.title,
            author,
            content: self.content,
        })
    }
}

/// The three mutable post fields after validation.
///
/// Only obtainable through [`PostDraft::validate`], so repositories can
/// store them without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    title: String,
    author: String,
    content: String,
}

impl PostFields {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Split into `(title, author, content)`.
    pub fn into_parts(self) -> (String, String, String) {
        (self.title, self.author, self.content)
    }
}
