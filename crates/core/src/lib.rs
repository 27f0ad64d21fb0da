//! Domain types and pure logic shared by every InfoComic crate.
//!
//! Nothing in here performs I/O: the comic data model, reel alignment
//! primitives, theme resolution and presentation helpers are all plain
//! functions over owned data so that the gateway client, the orchestrator
//! and the backend can agree on one vocabulary.

pub mod comic;
pub mod error;
pub mod presentation;
pub mod reel;
pub mod theme;
pub mod types;
pub mod user;
