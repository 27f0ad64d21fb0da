//! Reel assembly primitives.
//!
//! A reel pairs one caption with one chapter image. The generation service
//! returns narration as free text, so it has to be split into lines and
//! matched against the chapters that actually have images. When the counts
//! disagree, each image-bearing chapter contributes its own fallback caption
//! instead.
//!
//! Everything here is pure; the network round trips live in the pipeline
//! crate.

use serde::{Deserialize, Serialize};

use crate::comic::{Chapter, Comic};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Output filename sent to the video service when the caller gives none.
pub const DEFAULT_OUTPUT_FILENAME: &str = "comic_reel.mp4";
/// Subtitle style sent to the video service when the caller gives none.
pub const DEFAULT_SUBTITLE_STYLE: &str = "captions_ai";
/// Container format assumed when the video service does not report one.
pub const DEFAULT_VIDEO_FORMAT: &str = "mp4";
/// Caption for a chapter with no narration, conclusion or title.
pub const FALLBACK_PLACEHOLDER: &str = "...";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures of a reel assembly run.
///
/// Every variant renders a message suitable for showing to the end user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReelError {
    /// The generation service answered with a failure or an unusable payload.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The narration text contained no usable lines.
    #[error("Could not extract any narration lines for the reel")]
    EmptyNarration,

    /// No chapter has a resolved image to build a reel from.
    #[error("No chapter images are available to build a reel")]
    NoImages,

    /// Caption and image counts still differ after fallback alignment.
    /// Indicates corrupted chapter data rather than a transient failure.
    #[error("Caption count ({texts}) does not match image count ({images})")]
    Alignment { texts: usize, images: usize },

    /// The request could not be completed at all.
    #[error("Network error: {0}")]
    Network(String),

    /// An assembly for the same comic is already in flight.
    #[error("A reel is already being assembled for '{0}'")]
    Busy(String),

    /// The input comic cannot be assembled (e.g. it has no chapters).
    #[error("Invalid comic: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-supplied knobs for the video request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelOptions {
    pub output_filename: String,
    pub subtitle_style: String,
}

impl Default for ReelOptions {
    fn default() -> Self {
        Self {
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            subtitle_style: DEFAULT_SUBTITLE_STYLE.to_string(),
        }
    }
}

impl ReelOptions {
    /// Output filename, with blank values replaced by the default.
    pub fn output_filename(&self) -> &str {
        non_blank_or(&self.output_filename, DEFAULT_OUTPUT_FILENAME)
    }

    /// Subtitle style, with blank values replaced by the default.
    pub fn subtitle_style(&self) -> &str {
        non_blank_or(&self.subtitle_style, DEFAULT_SUBTITLE_STYLE)
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Video result
// ---------------------------------------------------------------------------

/// A composited reel as reported by the video service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Playable URL of the video.
    pub url: String,
    pub filename: String,
    pub format: String,
    pub duration_seconds: f64,
    pub created_at: Timestamp,
    /// Identifier of the uploaded asset on the media host, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Deep copy of `comic` with every chapter's `image_url` removed.
///
/// The narration request only needs the text of the comic.
pub fn sanitize_for_narration(comic: &Comic) -> Comic {
    let mut sanitized = comic.clone();
    for chapter in &mut sanitized.chapters {
        chapter.image_url = None;
    }
    sanitized.video_reference = None;
    sanitized
}

/// Serialize the sanitized comic into the single text payload the narration
/// endpoint expects.
pub fn narration_script(comic: &Comic) -> Result<String, ReelError> {
    serde_json::to_string(&sanitize_for_narration(comic))
        .map_err(|e| ReelError::Validation(format!("Comic could not be serialized: {e}")))
}

// ---------------------------------------------------------------------------
// Narration parsing
// ---------------------------------------------------------------------------

/// Split narration text into caption lines.
///
/// Each line is trimmed, loses a leading `"- "` list marker, and is trimmed
/// again. Empty lines are dropped; order is preserved. A bare `-` has no
/// `"- "` marker to strip and is kept as a caption.
pub fn parse_narration_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("- ").unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Asset collection and alignment
// ---------------------------------------------------------------------------

/// Captions and images gathered for one reel, before alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelAssets {
    pub narration_lines: Vec<String>,
    pub image_urls: Vec<String>,
    /// One caption per image-contributing chapter, in the same order as
    /// `image_urls`.
    fallback_texts: Vec<String>,
}

/// Captions and images of equal length, paired by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedReel {
    pub texts: Vec<String>,
    pub image_urls: Vec<String>,
    /// Whether the chapter fallback captions replaced the narration lines.
    pub used_fallback: bool,
}

/// Chapters that have a resolved image, in chapter-number order.
///
/// Chapters sharing a number keep their position in the comic.
pub fn image_chapters(comic: &Comic) -> Vec<&Chapter> {
    let mut chapters: Vec<&Chapter> = comic
        .chapters
        .iter()
        .filter(|chapter| chapter.image().is_some())
        .collect();
    chapters.sort_by_key(|chapter| chapter.chapter_number);
    chapters
}

impl ReelAssets {
    /// Gather narration lines from the service text and image URLs from the
    /// original (unsanitized) comic.
    ///
    /// Fails with [`ReelError::EmptyNarration`] when the text yields no lines,
    /// then with [`ReelError::NoImages`] when no chapter has an image.
    pub fn collect(narration: &str, comic: &Comic) -> Result<Self, ReelError> {
        let narration_lines = parse_narration_lines(narration);
        if narration_lines.is_empty() {
            return Err(ReelError::EmptyNarration);
        }

        let contributors = image_chapters(comic);
        if contributors.is_empty() {
            return Err(ReelError::NoImages);
        }

        let image_urls = contributors
            .iter()
            .filter_map(|chapter| chapter.image())
            .map(str::to_string)
            .collect();
        let fallback_texts = contributors
            .iter()
            .map(|chapter| chapter.fallback_text().to_string())
            .collect();

        Ok(Self {
            narration_lines,
            image_urls,
            fallback_texts,
        })
    }

    /// Pair captions with images.
    ///
    /// Equal counts pair positionally. Otherwise the per-chapter fallback
    /// captions are used; if even those disagree with the image count the
    /// chapter data is inconsistent and [`ReelError::Alignment`] is returned.
    pub fn align(self) -> Result<AlignedReel, ReelError> {
        if self.narration_lines.len() == self.image_urls.len() {
            return Ok(AlignedReel {
                texts: self.narration_lines,
                image_urls: self.image_urls,
                used_fallback: false,
            });
        }

        if self.fallback_texts.len() != self.image_urls.len() {
            return Err(ReelError::Alignment {
                texts: self.fallback_texts.len(),
                images: self.image_urls.len(),
            });
        }

        Ok(AlignedReel {
            texts: self.fallback_texts,
            image_urls: self.image_urls,
            used_fallback: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
