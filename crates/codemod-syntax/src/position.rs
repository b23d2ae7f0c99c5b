//! Shared position helpers.
//!
//! Tree-sitter positions are zero-based. For user-facing messages, we prefer
//! one-based line and column numbers.

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Returns the leading whitespace of the line containing `offset`.
///
/// Offsets past the end of `source` are clamped. The result never includes
/// the line terminator.
///
/// # Examples
///
/// ```
/// use codemod_syntax::line_indent;
///
/// let source = "{\n    return x;\n}";
/// assert_eq!(line_indent(source, 6), "    ");
/// ```
#[must_use]
pub fn line_indent(source: &str, offset: usize) -> &str {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    let prefix = source.get(..end).unwrap_or_default();
    let line_start = prefix.rfind('\n').map_or(0, |idx| idx.saturating_add(1));
    let line = source.get(line_start..).unwrap_or_default();
    let indent_len = line
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map_or(line.len(), |(idx, _)| idx);
    line.get(..indent_len).unwrap_or_default()
}
