//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{MAX_PAGE, PER_PAGE, Page, PostQuery};
pub use post::{
    ANONYMOUS_AUTHOR, AUTHOR_MAX_CHARS, Post, PostDraft, PostFields, TITLE_MAX_CHARS,
};
