//! Text presentation helpers: chapter paging, hover-term tokenization,
//! speech bubble placement and plain-text chapter rendering.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::comic::{Chapter, Comic};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// 1-based cursor over the chapters of a comic.
///
/// Moving past either end clamps instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterPager {
    current: usize,
    total: usize,
}

impl ChapterPager {
    /// Pager positioned on the first chapter. `None` for a comic without chapters.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then_some(Self { current: 1, total })
    }

    pub fn for_comic(comic: &Comic) -> Option<Self> {
        Self::new(comic.chapters.len())
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Jump to `page`, clamped to `1..=total`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current = page.clamp(1, self.total);
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.current.saturating_sub(1))
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Zero-based index of the current chapter.
    pub fn index(&self) -> usize {
        self.current - 1
    }

    /// `"Chapter 2 of 5"`, worded by the theme.
    pub fn label(&self, theme: &Theme) -> String {
        format!(
            "{} {} {} {}",
            theme.chapter_prefix, self.current, theme.chapter_of, self.total
        )
    }
}

// ---------------------------------------------------------------------------
// Hoverable tokens
// ---------------------------------------------------------------------------

/// Words and whitespace runs alternate; nothing is dropped.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+|\S+").expect("valid regex"));

/// One piece of tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word that can be hovered for an explanation.
    Term { id: String, text: String },
    /// A whitespace run, kept verbatim.
    Space(String),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Term { text, .. } | Token::Space(text) => text,
        }
    }

    pub fn is_hoverable(&self) -> bool {
        matches!(self, Token::Term { .. })
    }
}

/// Split `text` into words and whitespace runs.
///
/// Each word gets the id `"{term_type}_{index}"`, where `index` counts
/// tokens (including whitespace) from zero. Concatenating the token texts
/// reproduces the input exactly.
pub fn tokenize_hoverable(text: &str, term_type: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .enumerate()
        .map(|(index, m)| {
            let piece = m.as_str().to_string();
            if piece.trim().is_empty() {
                Token::Space(piece)
            } else {
                Token::Term {
                    id: format!("{term_type}_{index}"),
                    text: piece,
                }
            }
        })
        .collect()
}

/// Strip surrounding punctuation from a hovered word before asking for an
/// explanation.
pub fn clean_term(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

// ---------------------------------------------------------------------------
// Speech bubbles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleSide {
    Left,
    Right,
}

/// Even-indexed bubbles sit on the left, odd-indexed on the right.
pub fn bubble_side(index: usize) -> BubbleSide {
    if index % 2 == 0 {
        BubbleSide::Left
    } else {
        BubbleSide::Right
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

/// Render the comic header: themed title and tagline.
pub fn render_header(comic: &Comic, theme: &Theme) -> String {
    format!("{} {}\n{}\n", theme.title_prefix, comic.topic, theme.tagline)
}

/// Render one chapter as plain text for a terminal.
pub fn render_chapter_text(chapter: &Chapter, pager: &ChapterPager, theme: &Theme) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", theme.chapter_label, chapter.chapter_number);
    let _ = writeln!(out, "{}", chapter.chapter_title);
    let _ = writeln!(out, "{}", pager.label(theme));

    if let Some(narration) = &chapter.narration_box {
        let _ = writeln!(out, "\n[{}]\n{narration}", theme.narration_title);
    }

    if !chapter.chat_bubbles.is_empty() {
        out.push('\n');
        for (index, line) in chapter.chat_bubbles.iter().enumerate() {
            match bubble_side(index) {
                BubbleSide::Left => {
                    let _ = writeln!(
                        out,
                        "{} {}: {}",
                        theme.bubble_even_marker, line.character, line.dialogue
                    );
                }
                BubbleSide::Right => {
                    let _ = writeln!(
                        out,
                        "    {} {}: {}",
                        theme.bubble_odd_marker, line.character, line.dialogue
                    );
                }
            }
        }
    }

    if let Some(conclusion) = &chapter.conclusion {
        let _ = writeln!(out, "\n{conclusion}");
    }

    match chapter.image() {
        Some(url) => {
            let _ = writeln!(out, "\nImage: {url}");
        }
        None if chapter.is_pending_image() => {
            let _ = writeln!(out, "\nImage: pending ({})", chapter.image_context);
        }
        None => {}
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
