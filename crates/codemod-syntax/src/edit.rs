//! Span edits committed against an immutable source buffer.
//!
//! Edits are scheduled against byte ranges of the original text and applied
//! together by [`EditSet::commit`]. No edit observes another edit's effect:
//! ranges always refer to the original source, and the commit replaces from
//! the end of the buffer towards the start so earlier offsets stay valid.

use std::ops::Range;

use crate::error::SyntaxError;

/// A replacement of one byte range of the original source.
///
/// An empty range is an insertion at that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    range: Range<usize>,
    replacement: String,
}

impl Edit {
    /// Replaces the text covered by `node`.
    #[must_use]
    pub fn replace_node(node: tree_sitter::Node<'_>, replacement: impl Into<String>) -> Self {
        Self::replace_range(node.byte_range(), replacement)
    }

    /// Replaces the text covered by `range`.
    #[must_use]
    pub fn replace_range(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Inserts `text` at byte `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace_range(offset..offset, text)
    }

    /// Returns the byte range of the original source this edit replaces.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns whether this edit inserts without removing anything.
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        self.range.start == self.range.end
    }
}

/// An ordered collection of edits applied in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    /// Creates an empty edit set.
    #[must_use]
    pub const fn new() -> Self {
        Self { edits: Vec::new() }
    }

    /// Schedules an edit. Schedule order breaks ties between insertions at
    /// the same offset.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Returns the number of scheduled edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns whether no edits are scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the scheduled edits in schedule order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Applies every edit to `source` and returns the new text.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::EditOutOfBounds`] if an edit range lies
    /// outside `source` or splits a UTF-8 character, and
    /// [`SyntaxError::OverlappingEdits`] if two edits replace intersecting
    /// ranges.
    pub fn commit(&self, source: &str) -> Result<String, SyntaxError> {
        let mut ordered: Vec<&Edit> = self.edits.iter().collect();
        // Stable: insertions at one offset keep their schedule order.
        ordered.sort_by_key(|edit| (edit.range.start, edit.range.end));

        for edit in &ordered {
            let range = edit.range();
            if range.start > range.end
                || range.end > source.len()
                || !source.is_char_boundary(range.start)
                || !source.is_char_boundary(range.end)
            {
                return Err(SyntaxError::edit_out_of_bounds(range, source.len()));
            }
        }

        for pair in ordered.windows(2) {
            if let [first, second] = pair {
                if second.range.start < first.range.end {
                    return Err(SyntaxError::overlapping_edits(
                        first.range(),
                        second.range(),
                    ));
                }
            }
        }

        let mut result = source.to_owned();
        for edit in ordered.iter().rev() {
            result.replace_range(edit.range(), &edit.replacement);
        }

        Ok(result)
    }
}

impl FromIterator<Edit> for EditSet {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

impl Extend<Edit> for EditSet {
    fn extend<I: IntoIterator<Item = Edit>>(&mut self, iter: I) {
        self.edits.extend(iter);
    }
}
