//! Emoji glyph scanning shared by the review cleaners.
//!
//! An emoji-class character is one with the `Emoji_Presentation` or
//! `Extended_Pictographic` property. A glyph is such a character plus what is
//! attached to it: variation selector U+FE0F, skin-tone modifiers, and ZWJ links
//! to further emoji. `🌶️` and `👨‍👩‍👧‍👦` are each one glyph.

use std::sync::LazyLock;

use regex::Regex;

const VARIATION_SELECTOR: char = '\u{FE0F}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';

static EMOJI_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Emoji_Presentation}\p{Extended_Pictographic}]$").expect("valid regex")
});

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// A maximal piece of a line: either plain text or a single emoji glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Glyph(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Text(s) | Segment::Glyph(s) => s,
        }
    }

    pub fn is_glyph(&self) -> bool {
        matches!(self, Segment::Glyph(_))
    }
}

pub fn is_emoji_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    EMOJI_CLASS_RE.is_match(c.encode_utf8(&mut buf))
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

/// Byte offset just past the glyph starting at `start`.
fn glyph_end(line: &str, start: usize) -> usize {
    let mut end = start + line[start..].chars().next().map_or(0, char::len_utf8);

    loop {
        let mut ahead = line[end..].chars();
        match ahead.next() {
            Some(c) if c == VARIATION_SELECTOR || is_skin_tone(c) => end += c.len_utf8(),
            Some(ZERO_WIDTH_JOINER) => match ahead.next() {
                Some(next) if is_emoji_char(next) => {
                    end += ZERO_WIDTH_JOINER.len_utf8() + next.len_utf8();
                }
                _ => break,
            },
            _ => break,
        }
    }

    end
}

/// Splits a line into alternating text and glyph segments, in order.
/// Concatenating the segments reproduces the line exactly.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(c) = line[pos..].chars().next() {
        if !is_emoji_char(c) {
            pos += c.len_utf8();
            continue;
        }
        if text_start < pos {
            out.push(Segment::Text(&line[text_start..pos]));
        }
        let end = glyph_end(line, pos);
        out.push(Segment::Glyph(&line[pos..end]));
        pos = end;
        text_start = end;
    }

    if text_start < line.len() {
        out.push(Segment::Text(&line[text_start..]));
    }
    out
}

pub fn join(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::as_str).collect()
}

pub fn has_emoji(line: &str) -> bool {
    line.chars().any(is_emoji_char)
}

/// True when the last segment of the line is a glyph (no trailing text or whitespace).
pub fn ends_with_emoji(line: &str) -> bool {
    segments(line).last().is_some_and(Segment::is_glyph)
}

/// Removes every glyph, collapses the whitespace left behind and trims.
pub fn strip_emojis(line: &str) -> String {
    let text: String = segments(line)
        .into_iter()
        .filter(|s| !s.is_glyph())
        .map(|s| s.as_str())
        .collect();
    MULTI_SPACE_RE.replace_all(&text, " ").trim().to_string()
}
