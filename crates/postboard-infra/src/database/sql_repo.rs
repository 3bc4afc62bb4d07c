//! SeaORM post repository, shared by the SQLite and PostgreSQL backends.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, Condition, DbConn, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use postboard_core::domain::{Page, Post, PostFields, PostQuery};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Escape character for LIKE patterns.
const LIKE_ESCAPE: char = '!';

/// Post repository over a SeaORM connection pool.
pub struct SqlPostRepository {
    db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DbConn {
        self.db
    }
}

/// Escape `%`, `_` and the escape character itself so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `title LIKE %term% OR content LIKE %term%`.
///
/// Case sensitivity is whatever the backend's LIKE does: ASCII
/// case-insensitive on SQLite, case-sensitive on PostgreSQL.
fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(term));
    Condition::any()
        .add(
            Expr::col((PostEntity, post::Column::Title))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
        .add(
            Expr::col((PostEntity, post::Column::Content))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        )
}

fn map_db_err(err: DbErr) -> RepoError {
    if let Some(sql_err) = err.sql_err() {
        return RepoError::Constraint(sql_err.to_string());
    }
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let mut select = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id);
        if let Some(term) = query.search() {
            select = select.filter(search_condition(term));
        }

        // Count and page read from one snapshot.
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let paginator = select.paginate(&txn, query.per_page());
        let totals = paginator.num_items_and_pages().await.map_err(map_db_err)?;
        let models = if query.page() > totals.number_of_pages {
            Vec::new()
        } else {
            paginator
                .fetch_page(query.page_index())
                .await
                .map_err(map_db_err)?
        };
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(
            page = query.page(),
            total = totals.number_of_items,
            returned = models.len(),
            "Fetched post page"
        );

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            query.page(),
            query.per_page(),
            totals.number_of_items,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, fields: PostFields) -> Result<Post, RepoError> {
        let (title, author, content) = fields.into_parts();
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(title),
            author: Set(author),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let updated_at = Post::from(existing.clone()).next_updated_at(Utc::now());
        let (title, author, content) = fields.into_parts();

        let mut active = existing.into_active_model();
        active.title = Set(title);
        active.author = Set(author);
        active.content = Set(content);
        active.updated_at = Set(updated_at.fixed_offset());

        let model = active.update(&txn).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
