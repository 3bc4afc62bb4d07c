//! Post handlers: list/search, view, create, edit, delete.

use actix_web::{HttpResponse, web};

use postboard_core::domain::{Page, Post, PostDraft, PostQuery};
use postboard_shared::ApiResponse;
use postboard_shared::dto::{
    CreatePostRequest, DeletedResponse, ListPostsQuery, PaginationResponse, PostPageResponse,
    PostResponse, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        author: post.author,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn page_response(page: Page<Post>, search_query: Option<String>) -> PostPageResponse {
    let pagination = PaginationResponse {
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next: page.has_next(),
        has_prev: page.has_prev(),
        next_page: page.next_page(),
        prev_page: page.prev_page(),
    };

    PostPageResponse {
        posts: page.items.into_iter().map(post_response).collect(),
        pagination,
        search_query,
    }
}

/// GET /api/posts?page=N&search_query=S
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let query = PostQuery::new(params.page_number(), params.search_term());

    let page = state.posts.list(&query).await?;
    let search_query = query.search().map(str::to_string);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page, search_query))))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        author: req.author,
        content: req.content,
    };

    let post = state.posts.create(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft::new(req.title, req.content).with_author(req.author);

    let post = state.posts.update(path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeletedResponse { id },
        "Post deleted",
    )))
}
