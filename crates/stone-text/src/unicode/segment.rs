use core::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// How the parser groups runs into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// Words only; whitespace and punctuation between words are not reported.
    Words,
    /// Every extended grapheme cluster is reported.
    Graphemes,
}

/// Byte ranges of the segments the boundary walk reports, in scan order.
///
/// The ranges are ordered and disjoint but need not cover the whole text:
/// in word mode the separators between words are skipped.
pub fn boundary_spans(text: &str, mode: Segmentation) -> Vec<Range<usize>> {
    match mode {
        Segmentation::Words => text
            .split_word_bound_indices()
            .filter(|(_, segment)| segment.chars().any(|c| c.is_alphanumeric()))
            .map(|(start, segment)| start..start + segment.len())
            .collect(),
        Segmentation::Graphemes => text
            .grapheme_indices(true)
            .map(|(start, g)| start..start + g.len())
            .collect(),
    }
}

/// Partition `text` into token spans.
///
/// Every reported span becomes one token and every stretch of text the walk
/// skipped (before, between or after reported spans) becomes a token of its
/// own, so the result covers `0..text.len()` exactly.
pub fn token_spans(text: &str, mode: Segmentation) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut covered = 0;
    for span in boundary_spans(text, mode) {
        if span.start > covered {
            spans.push(covered..span.start);
        }
        covered = span.end;
        spans.push(span);
    }
    if covered < text.len() {
        spans.push(covered..text.len());
    }
    spans
}

/// Grapheme clusters of `text[span]`, as absolute byte ranges.
pub fn clusters_in(text: &str, span: Range<usize>) -> impl Iterator<Item = Range<usize>> + '_ {
    let base = span.start;
    text[span]
        .grapheme_indices(true)
        .map(move |(start, g)| base + start..base + start + g.len())
}
