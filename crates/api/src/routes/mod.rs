pub mod chapter;
pub mod comic_blog;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /chapter/add-comicblogs               publish a comic blog
/// /chapter/get-comicblogs               list all comic blogs
///
/// /comic-blog/get-comic-blog            first blog with a title
/// /comic-blog/get-user-comic-blogs      blogs owned by an email
/// /comic-blog/attach-video              attach a reel (requires auth, owner only)
///
/// /user/auth/register                   register and sign in
/// /user/auth/login                      sign in
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/chapter", chapter::router())
        .nest("/comic-blog", comic_blog::router())
        .nest("/user/auth", user::router())
}
