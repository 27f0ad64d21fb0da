//! Comic and chapter data model.
//!
//! Field names on the wire follow the generation service's JSON
//! (`comic_topic`, `chapter_number`, `narration_box`, ...). The backend
//! persists chapters in the same shape, so one set of types serves the
//! gateway, the session file and the comic store.
//!
//! Deserialization is deliberately lenient: generated comics routinely omit
//! fields or send empty strings. Blank optional text is read as absent and
//! [`Comic::normalize`] fills in chapter numbers and titles.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::theme::ComicStyle;

// ---------------------------------------------------------------------------
// Dialogue
// ---------------------------------------------------------------------------

/// One speech bubble inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    #[serde(default, deserialize_with = "string_or_null")]
    pub character: String,
    #[serde(default, alias = "text", deserialize_with = "string_or_null")]
    pub dialogue: String,
}

// ---------------------------------------------------------------------------
// Chapter
// ---------------------------------------------------------------------------

/// One titled unit of a comic.
///
/// `image_url` is filled in lazily after the text has been generated; until
/// then the chapter is "pending image" (see [`Chapter::is_pending_image`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position. `0` means "not supplied" until [`Comic::normalize`] runs.
    #[serde(default)]
    pub chapter_number: u32,
    #[serde(default, deserialize_with = "string_or_null")]
    pub chapter_title: String,
    #[serde(
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub narration_box: Option<String>,
    #[serde(default, alias = "chat_bubble", deserialize_with = "vec_or_null")]
    pub chat_bubbles: Vec<DialogueLine>,
    #[serde(
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub conclusion: Option<String>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub image_context: String,
    #[serde(
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Chapter {
    /// Build a chapter with only a number and title set.
    pub fn new(chapter_number: u32, chapter_title: impl Into<String>) -> Self {
        Self {
            chapter_number,
            chapter_title: chapter_title.into(),
            narration_box: None,
            chat_bubbles: Vec::new(),
            conclusion: None,
            image_context: String::new(),
            image_url: None,
        }
    }

    /// The resolved image URL, if any.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// A chapter that describes an image but has not received one yet.
    pub fn is_pending_image(&self) -> bool {
        !self.image_context.trim().is_empty() && self.image().is_none()
    }

    /// Text used for this chapter when gateway narration cannot be paired
    /// with the chapter images: narration, then conclusion, then title.
    pub fn fallback_text(&self) -> &str {
        self.narration_box
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.conclusion.as_deref().filter(|s| !s.trim().is_empty()))
            .or_else(|| Some(self.chapter_title.as_str()).filter(|s| !s.trim().is_empty()))
            .unwrap_or(crate::reel::FALLBACK_PLACEHOLDER)
    }
}

/// Default title for a chapter that arrived without one.
pub fn default_chapter_title(chapter_number: u32) -> String {
    format!("Chapter {chapter_number}")
}

// ---------------------------------------------------------------------------
// Comic
// ---------------------------------------------------------------------------

/// A generated comic: a topic plus an ordered list of chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    #[serde(
        rename = "comic_topic",
        alias = "title",
        default,
        deserialize_with = "string_or_null"
    )]
    pub topic: String,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub chapters: Vec<Chapter>,
    #[serde(
        default,
        deserialize_with = "lenient_style",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<ComicStyle>,
    /// URL of a reel composited from this comic, once one exists.
    #[serde(
        rename = "video_url",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_reference: Option<String>,
}

impl Comic {
    pub fn new(topic: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            topic: topic.into(),
            chapters,
            style: None,
            video_reference: None,
        }
    }

    /// Apply chapter defaults and restore `chapter_number` order.
    ///
    /// A chapter without a number takes its 1-based position; a chapter
    /// without a title becomes `"Chapter {n}"`. The sort is stable, so
    /// chapters sharing a number keep their relative order.
    pub fn normalize(&mut self) {
        normalize_chapters(&mut self.chapters);
    }

    /// Restore `chapter_number` order without touching numbers or titles.
    pub fn sort_chapters(&mut self) {
        self.chapters.sort_by_key(|chapter| chapter.chapter_number);
    }

    /// Check that chapters are numbered contiguously `1..=N` in order.
    pub fn validate_paging(&self) -> Result<(), CoreError> {
        if self.chapters.is_empty() {
            return Err(CoreError::Validation(
                "Comic must contain at least one chapter".to_string(),
            ));
        }
        for (index, chapter) in self.chapters.iter().enumerate() {
            let expected = index as u32 + 1;
            if chapter.chapter_number != expected {
                return Err(CoreError::Validation(format!(
                    "Chapter at position {expected} is numbered {}; chapters must run 1..{}",
                    chapter.chapter_number,
                    self.chapters.len()
                )));
            }
        }
        Ok(())
    }

    /// Chapters that still need an image generated.
    pub fn pending_images(&self) -> impl Iterator<Item = (usize, &Chapter)> {
        self.chapters
            .iter()
            .enumerate()
            .filter(|(_, chapter)| chapter.is_pending_image())
    }

    /// Style to render with: the explicit style, else a guess from the topic.
    pub fn display_style(&self) -> ComicStyle {
        self.style
            .unwrap_or_else(|| ComicStyle::guess_from_topic(&self.topic))
    }
}

/// Apply the chapter defaults used by both the client and the backend.
pub fn normalize_chapters(chapters: &mut [Chapter]) {
    for (index, chapter) in chapters.iter_mut().enumerate() {
        if chapter.chapter_number == 0 {
            chapter.chapter_number = index as u32 + 1;
        }
        if chapter.chapter_title.trim().is_empty() {
            chapter.chapter_title = default_chapter_title(chapter.chapter_number);
        }
    }
    chapters.sort_by_key(|chapter| chapter.chapter_number);
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Unknown style names resolve to the default theme instead of failing.
fn lenient_style<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ComicStyle>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .map(|s| ComicStyle::resolve(Some(&s))))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
