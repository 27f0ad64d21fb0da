//! Client for the generation service.
//!
//! [`GatewayApi`] talks to the service over HTTP; the [`Gateway`] trait is
//! the seam the orchestrator is written against so flows can be exercised
//! with an in-memory implementation.

use std::future::Future;

use infocomic_core::comic::Comic;

pub mod api;
pub mod error;
pub mod messages;

pub use api::{GatewayApi, GatewayConfig};
pub use error::GatewayError;
pub use messages::{ComicRequest, RenderedVideo, VideoRequest};

/// Operations offered by the generation service.
pub trait Gateway: Send + Sync {
    /// Produce free-text narration for a serialized, image-free comic.
    fn generate_narration(
        &self,
        comic_script: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Composite a reel from paired captions and images.
    fn generate_video(
        &self,
        request: &VideoRequest,
    ) -> impl Future<Output = Result<RenderedVideo, GatewayError>> + Send;

    /// Generate a comic for a topic. The returned comic is normalized.
    fn generate_comic(
        &self,
        request: &ComicRequest,
    ) -> impl Future<Output = Result<Comic, GatewayError>> + Send;

    /// Generate one image, returning its URL.
    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Explain a highlighted word within its surrounding text.
    fn explain_highlight(
        &self,
        context: &str,
        highlight: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}
