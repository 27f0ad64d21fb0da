//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod comic_blog_repo;
pub mod user_repo;

pub use comic_blog_repo::ComicBlogRepo;
pub use user_repo::UserRepo;
