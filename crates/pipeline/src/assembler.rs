//! Reel assembly.
//!
//! One run makes exactly two calls to the generation service: narration for
//! the image-free comic, then a video built from the aligned captions and
//! chapter images. Nothing is memoized; a second run repeats both calls.
//!
//! At most one run per comic topic may be outstanding on an assembler.
//! A second request for the same topic is rejected with [`ReelError::Busy`]
//! rather than queued. The slot is released when the run finishes or its
//! future is dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use infocomic_core::comic::Comic;
use infocomic_core::reel::{
    narration_script, ReelAssets, ReelError, ReelOptions, VideoResult, DEFAULT_VIDEO_FORMAT,
};
use infocomic_gateway::{Gateway, RenderedVideo, VideoRequest};

use crate::session::SessionContext;

/// Drives reel assembly against a [`Gateway`].
///
/// Cheap to clone; clones share the gateway and the in-flight set.
pub struct ReelAssembler<G> {
    gateway: Arc<G>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl<G> Clone for ReelAssembler<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<G: Gateway> ReelAssembler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            in_flight: Arc::default(),
        }
    }

    /// Whether a run for `topic` is outstanding.
    pub fn is_busy(&self, topic: &str) -> bool {
        lock(&self.in_flight).contains(topic)
    }

    /// Build a reel for `comic` and return the rendered video.
    ///
    /// The comic is not modified. Failures are reported in pipeline order:
    /// narration, empty narration, missing images, alignment, video.
    pub async fn assemble_reel(
        &self,
        comic: &Comic,
        options: &ReelOptions,
    ) -> Result<VideoResult, ReelError> {
        if comic.chapters.is_empty() {
            return Err(ReelError::Validation(
                "Comic has no chapters to build a reel from".to_string(),
            ));
        }

        let _slot = InFlightGuard::acquire(&self.in_flight, &comic.topic)?;

        tracing::info!(topic = %comic.topic, chapters = comic.chapters.len(), "Assembling reel");

        let script = narration_script(comic)?;
        let narration = self.gateway.generate_narration(&script).await?;

        let assets = ReelAssets::collect(&narration, comic)?;
        tracing::debug!(
            narration_lines = assets.narration_lines.len(),
            images = assets.image_urls.len(),
            "Collected reel assets",
        );

        let aligned = assets.align()?;
        if aligned.used_fallback {
            tracing::warn!(
                topic = %comic.topic,
                images = aligned.image_urls.len(),
                "Narration line count differs from image count, using chapter text",
            );
        }

        let request = VideoRequest {
            texts: aligned.texts,
            image_urls: aligned.image_urls,
            subtitle_style: options.subtitle_style().to_string(),
            output_filename: options.output_filename().to_string(),
        };
        let rendered = self.gateway.generate_video(&request).await?;

        tracing::info!(topic = %comic.topic, url = %rendered.video_url, "Reel rendered");

        Ok(video_result(rendered, options))
    }

    /// Build a reel for the session's current comic and cache it in the
    /// session. On failure the session is left untouched.
    pub async fn assemble_for_session(
        &self,
        session: &mut SessionContext,
        options: &ReelOptions,
    ) -> Result<VideoResult, ReelError> {
        let comic = session
            .comic
            .as_ref()
            .ok_or_else(|| ReelError::Validation("No comic is loaded".to_string()))?;

        let video = self.assemble_reel(comic, options).await?;
        session.record_video(video.clone());
        Ok(video)
    }
}

fn video_result(rendered: RenderedVideo, options: &ReelOptions) -> VideoResult {
    VideoResult {
        url: rendered.video_url,
        filename: options.output_filename().to_string(),
        format: rendered
            .format
            .unwrap_or_else(|| DEFAULT_VIDEO_FORMAT.to_string()),
        duration_seconds: rendered.duration_seconds.unwrap_or(0.0),
        created_at: Utc::now(),
        public_id: rendered.public_id,
    }
}

// ---------------------------------------------------------------------------
// In-flight slot
// ---------------------------------------------------------------------------

/// Holds a topic in the in-flight set until dropped.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    topic: String,
}

impl InFlightGuard {
    fn acquire(in_flight: &Arc<Mutex<HashSet<String>>>, topic: &str) -> Result<Self, ReelError> {
        if !lock(in_flight).insert(topic.to_string()) {
            tracing::warn!(topic, "Reel assembly already in progress");
            return Err(ReelError::Busy(topic.to_string()));
        }
        Ok(Self {
            in_flight: Arc::clone(in_flight),
            topic: topic.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.topic);
    }
}

/// The set holds plain strings, so a poisoned lock is still consistent.
fn lock(set: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
