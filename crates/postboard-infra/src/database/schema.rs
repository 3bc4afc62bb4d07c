//! Schema bootstrap straight from the entity definitions.
//!
//! The `migration` app is the normal way to create tables; this is for
//! in-memory databases and `DB_CREATE_SCHEMA=true` deployments.

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::post;

/// Create the `posts` table if it does not exist yet.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut posts = schema.create_table_from_entity(post::Entity);
    posts.if_not_exists();
    db.execute(backend.build(&posts)).await?;

    tracing::info!("Schema ready");
    Ok(())
}
