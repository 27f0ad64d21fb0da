//! Comic styles and their presentation themes.
//!
//! A style key resolves case-insensitively to one of four built-in themes.
//! Anything unrecognized (or no key at all) resolves to [`ComicStyle::Marvel`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Visual style of a comic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComicStyle {
    #[default]
    Marvel,
    Dc,
    Manga,
    Indie,
}

/// All styles in menu order.
pub const ALL_STYLES: &[ComicStyle] = &[
    ComicStyle::Marvel,
    ComicStyle::Dc,
    ComicStyle::Manga,
    ComicStyle::Indie,
];

/// Topic keywords that suggest a style when none was chosen explicitly.
/// Checked in order; the first matching style wins.
const TOPIC_KEYWORDS: &[(ComicStyle, &[&str])] = &[
    (ComicStyle::Manga, &["japan", "anime", "ninja"]),
    (ComicStyle::Dc, &["batman", "superman", "justice"]),
    (ComicStyle::Indie, &["indie", "alternative", "underground"]),
    (ComicStyle::Marvel, &["marvel", "avengers", "spider"]),
];

impl ComicStyle {
    /// Lower-case key used on the wire and in the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComicStyle::Marvel => "marvel",
            ComicStyle::Dc => "dc",
            ComicStyle::Manga => "manga",
            ComicStyle::Indie => "indie",
        }
    }

    /// Resolve an optional style key, falling back to the default theme.
    pub fn resolve(key: Option<&str>) -> ComicStyle {
        key.and_then(|k| k.parse().ok()).unwrap_or_default()
    }

    /// Guess a style from keywords in the comic topic.
    pub fn guess_from_topic(topic: &str) -> ComicStyle {
        let topic = topic.to_lowercase();
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| topic.contains(w)))
            .map(|(style, _)| *style)
            .unwrap_or_default()
    }

    /// Theme data for this style.
    pub fn theme(&self) -> &'static Theme {
        match self {
            ComicStyle::Marvel => &MARVEL,
            ComicStyle::Dc => &DC,
            ComicStyle::Manga => &MANGA,
            ComicStyle::Indie => &INDIE,
        }
    }
}

impl FromStr for ComicStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "marvel" => Ok(ComicStyle::Marvel),
            "dc" => Ok(ComicStyle::Dc),
            "manga" => Ok(ComicStyle::Manga),
            "indie" => Ok(ComicStyle::Indie),
            other => Err(CoreError::Validation(format!(
                "Unknown comic style '{other}'. Must be one of: marvel, dc, manga, indie"
            ))),
        }
    }
}

impl fmt::Display for ComicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a theme by style key, case-insensitively, defaulting to Marvel.
pub fn resolve_theme(key: Option<&str>) -> &'static Theme {
    ComicStyle::resolve(key).theme()
}

// ---------------------------------------------------------------------------
// Theme data
// ---------------------------------------------------------------------------

/// Text labels and accents for one comic style.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub style: ComicStyle,
    pub display_name: &'static str,
    pub title_prefix: &'static str,
    pub tagline: &'static str,
    pub chapter_label: &'static str,
    pub chapter_prefix: &'static str,
    pub chapter_of: &'static str,
    pub narration_title: &'static str,
    /// Marker printed before even-indexed speech bubbles.
    pub bubble_even_marker: &'static str,
    /// Marker printed before odd-indexed speech bubbles.
    pub bubble_odd_marker: &'static str,
}

static MARVEL: Theme = Theme {
    style: ComicStyle::Marvel,
    display_name: "Marvel",
    title_prefix: "The Incredible Story of",
    tagline: "A thrilling journey exploring the world of knowledge!",
    chapter_label: "CHAPTER",
    chapter_prefix: "Chapter",
    chapter_of: "of",
    narration_title: "Narration",
    bubble_even_marker: ">>",
    bubble_odd_marker: "<<",
};

static DC: Theme = Theme {
    style: ComicStyle::Dc,
    display_name: "DC",
    title_prefix: "The Legendary Saga of",
    tagline: "Heroes rise where knowledge leads.",
    chapter_label: "ISSUE",
    chapter_prefix: "Issue",
    chapter_of: "of",
    narration_title: "Meanwhile...",
    bubble_even_marker: "->",
    bubble_odd_marker: "<-",
};

static MANGA: Theme = Theme {
    style: ComicStyle::Manga,
    display_name: "Manga",
    title_prefix: "The Chronicles of",
    tagline: "Every page a new adventure.",
    chapter_label: "VOLUME",
    chapter_prefix: "Volume",
    chapter_of: "/",
    narration_title: "Narrator",
    bubble_even_marker: "「",
    bubble_odd_marker: "『",
};

static INDIE: Theme = Theme {
    style: ComicStyle::Indie,
    display_name: "Indie",
    title_prefix: "A Story About",
    tagline: "Small press, big ideas.",
    chapter_label: "PART",
    chapter_prefix: "Part",
    chapter_of: "of",
    narration_title: "Notes",
    bubble_even_marker: "*",
    bubble_odd_marker: "~",
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
