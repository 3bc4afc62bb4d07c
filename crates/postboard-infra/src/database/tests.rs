//! Repository behaviour shared by every adapter.

use std::collections::HashSet;
use std::time::Duration;

use postboard_core::domain::{ANONYMOUS_AUTHOR, PER_PAGE, Post, PostDraft, PostQuery};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::memory::InMemoryPostRepository;

type Adapter = (&'static str, Box<dyn PostRepository>);

#[cfg(feature = "sqlite")]
async fn sqlite_repo() -> super::SqlPostRepository {
    let mut config = super::DatabaseConfig::new("sqlite::memory:");
    config.create_schema = true;
    let db = super::connect(&config).await.unwrap();
    super::SqlPostRepository::new(db)
}

/// A fresh, empty store per adapter.
async fn adapters() -> Vec<Adapter> {
    #[allow(unused_mut)]
    let mut repos: Vec<Adapter> = vec![("memory", Box::new(InMemoryPostRepository::new()))];
    #[cfg(feature = "sqlite")]
    repos.push(("sqlite", Box::new(sqlite_repo().await)));
    repos
}

async fn create(repo: &dyn PostRepository, draft: PostDraft) -> Post {
    repo.insert(draft.validate().unwrap()).await.unwrap()
}

async fn search(repo: &dyn PostRepository, term: &str) -> Vec<Post> {
    repo.list(&PostQuery::new(1, Some(term.to_string())))
        .await
        .unwrap()
        .items
}

#[tokio::test]
async fn create_stamps_equal_timestamps_and_defaults_author() {
    for (name, repo) in adapters().await {
        let post = create(&*repo, PostDraft::new("Hello", "World")).await;
        assert_eq!(post.created_at, post.updated_at, "{name}");
        assert_eq!(post.author, ANONYMOUS_AUTHOR, "{name}");

        let jane = create(&*repo, PostDraft::new("Hi", "there").with_author("Jane")).await;
        assert_eq!(jane.author, "Jane", "{name}");
        assert_ne!(jane.id, post.id, "{name}");

        let stored = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored, post, "{name}");
    }
}

#[tokio::test]
async fn update_moves_updated_at_only() {
    for (name, repo) in adapters().await {
        let original = create(&*repo, PostDraft::new("Draft", "first")).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let fields = PostDraft::new("Final", "second")
            .with_author("Jane")
            .validate()
            .unwrap();
        let updated = repo.update(original.id, fields).await.unwrap();

        assert_eq!(updated.id, original.id, "{name}");
        assert_eq!(updated.title, "Final", "{name}");
        assert_eq!(updated.author, "Jane", "{name}");
        assert_eq!(updated.content, "second", "{name}");
        assert_eq!(updated.created_at, original.created_at, "{name}");
        assert!(updated.updated_at > original.updated_at, "{name}");

        let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored, updated, "{name}");
    }
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    for (name, repo) in adapters().await {
        assert!(repo.find_by_id(404).await.unwrap().is_none(), "{name}");

        let fields = PostDraft::new("t", "c").validate().unwrap();
        let err = repo.update(404, fields).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound), "{name}: {err}");

        let err = repo.delete(404).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound), "{name}: {err}");
    }
}

#[tokio::test]
async fn delete_is_permanent() {
    for (name, repo) in adapters().await {
        let post = create(&*repo, PostDraft::new("Bye", "soon gone")).await;
        let keep = create(&*repo, PostDraft::new("Stay", "still here")).await;

        repo.delete(post.id).await.unwrap();

        assert!(repo.find_by_id(post.id).await.unwrap().is_none(), "{name}");
        assert!(repo.find_by_id(keep.id).await.unwrap().is_some(), "{name}");
        let err = repo.delete(post.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound), "{name}");
    }
}

#[tokio::test]
async fn pages_are_disjoint_and_cover_every_post() {
    for (name, repo) in adapters().await {
        let mut created = Vec::new();
        for i in 0..25 {
            created.push(create(&*repo, PostDraft::new(format!("Post {i}"), "body")).await.id);
        }

        let mut seen = Vec::new();
        for page in 1..=3 {
            let result = repo.list(&PostQuery::new(page, None)).await.unwrap();
            assert_eq!(result.page, page, "{name}");
            assert_eq!(result.per_page, PER_PAGE, "{name}");
            assert_eq!(result.total_items, 25, "{name}");
            assert_eq!(result.total_pages, 3, "{name}");
            assert_eq!(result.has_prev(), page > 1, "{name}");
            assert_eq!(result.has_next(), page < 3, "{name}");
            seen.extend(result.items.iter().map(|p| p.id));
        }

        let unique: HashSet<i32> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len(), "{name}: pages overlap");

        // Newest first; equal timestamps fall back to id descending.
        created.reverse();
        assert_eq!(seen, created, "{name}");

        let beyond = repo.list(&PostQuery::new(4, None)).await.unwrap();
        assert!(beyond.items.is_empty(), "{name}");
        assert_eq!(beyond.total_items, 25, "{name}");
    }
}

#[tokio::test]
async fn largest_page_number_is_empty_not_a_panic() {
    for (name, repo) in adapters().await {
        create(&*repo, PostDraft::new("Only", "post")).await;

        let result = repo.list(&PostQuery::new(u64::MAX, None)).await.unwrap();
        assert!(result.items.is_empty(), "{name}");
        assert_eq!(result.total_items, 1, "{name}");
        assert_eq!(result.total_pages, 1, "{name}");
        assert!(!result.has_next(), "{name}");
    }
}

#[tokio::test]
async fn ordering_follows_created_at_not_updated_at() {
    for (name, repo) in adapters().await {
        let older = create(&*repo, PostDraft::new("Older", "a")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = create(&*repo, PostDraft::new("Newer", "b")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let fields = PostDraft::new("Older, edited", "a").validate().unwrap();
        repo.update(older.id, fields).await.unwrap();

        let ids: Vec<i32> = repo
            .list(&PostQuery::default())
            .await
            .unwrap()
            .items
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id], "{name}");
    }
}

#[tokio::test]
async fn search_matches_title_or_content() {
    for (name, repo) in adapters().await {
        let by_title = create(&*repo, PostDraft::new("Rust tips", "borrowing")).await;
        let by_content = create(&*repo, PostDraft::new("Notes", "written in Rust")).await;
        create(&*repo, PostDraft::new("Gardening", "tomatoes")).await;

        let found: HashSet<i32> = search(&*repo, "Rust").await.iter().map(|p| p.id).collect();
        assert_eq!(found, HashSet::from([by_title.id, by_content.id]), "{name}");

        for post in search(&*repo, "Rust").await {
            assert!(
                post.title.to_lowercase().contains("rust")
                    || post.content.to_lowercase().contains("rust"),
                "{name}"
            );
        }

        assert!(search(&*repo, "xyz").await.is_empty(), "{name}");

        // Both adapters follow SQLite's ASCII case-insensitive LIKE.
        assert_eq!(search(&*repo, "TOMATOES").await.len(), 1, "{name}");
    }
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    for (name, repo) in adapters().await {
        let percent = create(&*repo, PostDraft::new("Sale", "Discount 100% off")).await;
        create(&*repo, PostDraft::new("List", "1000 reasons")).await;
        let underscore = create(&*repo, PostDraft::new("snake_case", "naming")).await;
        create(&*repo, PostDraft::new("snakeXcase", "naming")).await;

        let ids: Vec<i32> = search(&*repo, "100%").await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![percent.id], "{name}");

        let ids: Vec<i32> = search(&*repo, "e_c").await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![underscore.id], "{name}");
    }
}

#[tokio::test]
async fn filtered_pagination_counts_only_matches() {
    for (name, repo) in adapters().await {
        for i in 0..12 {
            create(&*repo, PostDraft::new(format!("match {i}"), "x")).await;
            create(&*repo, PostDraft::new(format!("other {i}"), "y")).await;
        }

        let query = PostQuery::new(2, Some("match".to_string()));
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total_items, 12, "{name}");
        assert_eq!(page.total_pages, 2, "{name}");
        assert_eq!(page.items.len(), 2, "{name}");
        assert!(page.items.iter().all(|p| p.title.starts_with("match")), "{name}");
    }
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn generated_schema_defaults_author_column() {
    use sea_orm::ConnectionTrait;

    let mut config = super::DatabaseConfig::new("sqlite::memory:");
    config.create_schema = true;
    let db = super::connect(&config).await.unwrap();
    db.execute_unprepared(
        "INSERT INTO posts (title, content, created_at, updated_at) \
         VALUES ('Raw', 'row', '2026-10-19T00:00:00+00:00', '2026-10-19T00:00:00+00:00')",
    )
    .await
    .unwrap();

    let repo = super::SqlPostRepository::new(db);
    let post = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(post.author, ANONYMOUS_AUTHOR);
}

#[tokio::test]
async fn hello_world_lifecycle() {
    for (name, repo) in adapters().await {
        create(&*repo, PostDraft::new("Earlier", "post")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let post = create(&*repo, PostDraft::new("Hello", "World").with_author("")).await;
        assert_eq!(post.author, ANONYMOUS_AUTHOR, "{name}");

        let first_page = repo.list(&PostQuery::default()).await.unwrap();
        assert_eq!(first_page.items.first().map(|p| p.id), Some(post.id), "{name}");

        let found = search(&*repo, "World").await;
        assert!(found.iter().any(|p| p.id == post.id), "{name}");
        assert!(search(&*repo, "xyz").await.is_empty(), "{name}");

        repo.delete(post.id).await.unwrap();
        assert!(repo.find_by_id(post.id).await.unwrap().is_none(), "{name}");
    }
}

#[cfg(feature = "database")]
mod mock {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};

    use postboard_core::domain::PostDraft;
    use postboard_core::error::RepoError;
    use postboard_core::ports::PostRepository;

    use crate::database::SqlPostRepository;
    use crate::database::entity::post;

    #[tokio::test]
    async fn find_by_id_maps_model_to_domain() {
        let now = Utc::now().fixed_offset();
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![post::Model {
                created_at: now,
                updated_at: now,
                ..model(7)
            }]])
            .into_connection();

        let repo = SqlPostRepository::new(db);
        let post = repo.find_by_id(7).await.unwrap().unwrap();

        assert_eq!(post.id, 7);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.author, "Jane");
        assert_eq!(post.created_at, now);
    }

    #[tokio::test]
    async fn query_failures_surface_as_storage_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("disk I/O error".to_owned())])
            .into_connection();

        let repo = SqlPostRepository::new(db);
        let err = repo.find_by_id(1).await.unwrap_err();

        assert!(matches!(err, RepoError::Query(msg) if msg.contains("disk I/O error")));
    }

    #[tokio::test]
    async fn delete_without_affected_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SqlPostRepository::new(db);
        let err = repo.delete(9).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    fn model(id: i32) -> post::Model {
        let now = Utc::now().fixed_offset();
        post::Model {
            id,
            title: "Test Post".to_owned(),
            author: "Jane".to_owned(),
            content: "Content".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Every statement the mock saw, committed or rolled back.
    fn statement_log(db: DatabaseConnection) -> String {
        format!("{:?}", db.into_transaction_log())
    }

    #[tokio::test]
    async fn failed_insert_is_not_committed() {
        // Insert goes through exec, or through a RETURNING query on backends
        // that support it; fail both paths.
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Custom("disk full".to_owned())])
            .append_query_errors([DbErr::Custom("disk full".to_owned())])
            .into_connection();

        let repo = SqlPostRepository::new(db);
        let fields = PostDraft::new("Hello", "World").validate().unwrap();
        let err = repo.insert(fields).await.unwrap_err();
        assert!(matches!(err, RepoError::Query(msg) if msg.contains("disk full")));

        let log = statement_log(repo.into_connection());
        assert!(!log.contains("COMMIT"), "{log}");
        assert!(log.contains("ROLLBACK"), "{log}");
    }

    #[tokio::test]
    async fn failed_update_write_is_not_committed() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![model(3)]])
            .append_query_errors([DbErr::Custom("database is locked".to_owned())])
            .append_exec_errors([DbErr::Custom("database is locked".to_owned())])
            .into_connection();

        let repo = SqlPostRepository::new(db);
        let fields = PostDraft::new("Edited", "Body").validate().unwrap();
        let err = repo.update(3, fields).await.unwrap_err();
        assert!(matches!(err, RepoError::Query(msg) if msg.contains("database is locked")));

        let log = statement_log(repo.into_connection());
        assert!(log.contains("UPDATE"), "{log}");
        assert!(!log.contains("COMMIT"), "{log}");
        assert!(log.contains("ROLLBACK"), "{log}");
    }
}
