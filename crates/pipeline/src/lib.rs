//! Client-side workflows over the generation service.
//!
//! - [`assembler`] -- reel assembly: narration, alignment, video.
//! - [`flows`] -- comic generation, image back-fill and term explanations.
//! - [`session`] -- the explicit client state those workflows update.

pub mod assembler;
pub mod flows;
pub mod session;

pub use assembler::ReelAssembler;
pub use flows::FlowError;
pub use session::SessionContext;
