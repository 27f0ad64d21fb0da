//! Route definitions for the `/comic-blog` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::comic_blog;
use crate::state::AppState;

/// Routes mounted at `/comic-blog`.
///
/// ```text
/// POST /get-comic-blog         -> get_comic_blog
/// POST /get-user-comic-blogs   -> get_user_comic_blogs
/// POST /attach-video           -> attach_video (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-comic-blog", post(comic_blog::get_comic_blog))
        .route("/get-user-comic-blogs", post(comic_blog::get_user_comic_blogs))
        .route("/attach-video", post(comic_blog::attach_video))
}
