//! Emoji placement cleanup.
//!
//! No period may touch an emoji on either side, and a glyph may not repeat
//! back to back. Works anywhere in the line, not only at the end.

use crate::reviews::emoji::{segments, Segment};

/// Removes period runs adjacent to any glyph and collapses runs of identical
/// adjacent glyphs to one. Idempotent.
pub fn clean_emoji_placement(line: &str) -> String {
    let segs = segments(line.trim());
    let mut out = String::with_capacity(line.len());
    let mut last_glyph: Option<&str> = None;

    for (i, seg) in segs.iter().enumerate() {
        match *seg {
            Segment::Glyph(glyph) => {
                if last_glyph == Some(glyph) {
                    continue;
                }
                out.push_str(glyph);
                last_glyph = Some(glyph);
            }
            Segment::Text(mut text) => {
                // Text segments are maximal, so neighbours are always glyphs.
                if i > 0 {
                    text = text.trim_start_matches('.');
                }
                if i + 1 < segs.len() {
                    text = text.trim_end_matches('.');
                }
                if !text.is_empty() {
                    out.push_str(text);
                    last_glyph = None;
                }
            }
        }
    }

    out.trim().to_string()
}
