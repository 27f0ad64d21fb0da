//! Route definitions for the `/chapter` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::chapter;
use crate::state::AppState;

/// Routes mounted at `/chapter`.
///
/// ```text
/// POST /add-comicblogs   -> add_comic_blog
/// POST /get-comicblogs   -> list_comic_blogs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-comicblogs", post(chapter::add_comic_blog))
        .route("/get-comicblogs", post(chapter::list_comic_blogs))
}
