//! Text edits produced by quick fixes.

use text_size::{TextRange, TextSize};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self { range, replacement: replacement.into() }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::empty(offset), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, String::new())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("edit range {range:?} is out of bounds for text length {len:?}")]
    OutOfBounds { range: TextRange, len: TextSize },
    #[error("offset {offset:?} is not on a character boundary")]
    NotCharBoundary { offset: TextSize },
    #[error("edits {first:?} and {second:?} overlap")]
    Overlapping { first: TextRange, second: TextRange },
}

/// Applies non-overlapping edits to `text`. Edits may come in any order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits: Vec<&TextEdit> = edits.iter().collect();
    edits.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    let len = TextSize::of(text);
    for edit in &edits {
        if edit.range.end() > len {
            return Err(EditError::OutOfBounds { range: edit.range, len });
        }
        for offset in [edit.range.start(), edit.range.end()] {
            if !text.is_char_boundary(offset.into()) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
    }
    for pair in edits.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        // Two inserts at the same offset have no defined order.
        if first.end() > second.start() || (first.is_empty() && first == second) {
            return Err(EditError::Overlapping { first, second });
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for edit in edits {
        let range: std::ops::Range<usize> = edit.range.into();
        out.push_str(&text[cursor..range.start]);
        out.push_str(&edit.replacement);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[test]
    fn applies_unsorted_edits() {
        let edits = [TextEdit::delete(range(8, 10)), TextEdit::new(range(5, 6), "; int[]")];
        assert_eq!(apply_edits("int a, b[];", &edits).unwrap(), "int a; int[] b;");
    }

    #[test]
    fn insert_and_replace_at_boundaries() {
        let edits = [TextEdit::insert(TextSize::from(0), "final "), TextEdit::insert(TextSize::from(3), "[]")];
        assert_eq!(apply_edits("int x;", &edits).unwrap(), "final int[] x;");
    }

    #[test]
    fn rejects_overlap_and_bounds() {
        let overlapping = [TextEdit::delete(range(0, 3)), TextEdit::delete(range(2, 4))];
        assert!(matches!(
            apply_edits("abcdef", &overlapping),
            Err(EditError::Overlapping { .. })
        ));
        let outside = [TextEdit::delete(range(4, 9))];
        assert!(matches!(apply_edits("abcdef", &outside), Err(EditError::OutOfBounds { .. })));
    }
}
