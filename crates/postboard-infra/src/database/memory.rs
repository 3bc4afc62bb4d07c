//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postboard_core::domain::{Page, Post, PostFields, PostQuery};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    last_id: i32,
    posts: BTreeMap<i32, Post>,
}

/// In-memory post repository using a `BTreeMap` behind an async RwLock.
///
/// Search is ASCII case-insensitive, like SQLite's LIKE.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn matches_search(post: &Post, term: &str) -> bool {
    contains_ignore_ascii_case(&post.title, term) || contains_ignore_ascii_case(&post.content, term)
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&Post> = store
            .posts
            .values()
            .filter(|post| query.search().is_none_or(|term| matches_search(post, term)))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(query.per_page() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, query.page(), query.per_page(), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn insert(&self, fields: PostFields) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id space exhausted".to_string()))?;
        let (title, author, content) = fields.into_parts();
        let now = Utc::now();
        let post = Post {
            id,
            title,
            author,
            content,
            created_at: now,
            updated_at: now,
        };

        store.last_id = id;
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        let (title, author, content) = fields.into_parts();
        post.updated_at = post.next_updated_at(Utc::now());
        post.title = title;
        post.author = author;
        post.content = content;

        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
