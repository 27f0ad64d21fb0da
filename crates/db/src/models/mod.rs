//! Row types and DTOs, one module per table.

pub mod comic_blog;
pub mod user;
