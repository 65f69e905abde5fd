//! Page-range resolution.
//!
//! Turns a page selection mode plus a range expression such as `1-5,8,11-13`
//! into the ascending, de-duplicated set of pages to print.

use std::collections::BTreeSet;

use crate::domain::{PageRangeToken, PageSelectionMode, PageSelectionResult, RangeError};

/// Classification of one comma-separated segment.
enum Segment {
    Page(PageRangeToken),
    OutOfBounds(u64),
    Ignored,
}

/// Resolves a page selection against a document's page count.
///
/// - `All` selects `1..=total_pages` and ignores `range_text`.
/// - `Custom` with empty text selects nothing, without an error.
/// - Numbers are read permissively: leading whitespace and a `+` are
///   skipped and the leading run of digits is the value, so `2x` and `2.5`
///   both mean page 2. A range `a-b-c` uses only `a-b`.
/// - Segments with no leading digits, `start > end`, or page 0 are skipped
///   silently.
/// - The first segment naming a page past `total_pages` aborts the whole
///   selection with [`RangeError::PageOutOfBounds`].
#[must_use]
pub fn resolve(mode: PageSelectionMode, range_text: &str, total_pages: u32) -> PageSelectionResult {
    let result = match mode {
        PageSelectionMode::All => PageSelectionResult::selected((1..=total_pages).collect()),
        PageSelectionMode::Custom if range_text.is_empty() => PageSelectionResult::default(),
        PageSelectionMode::Custom => match tokenize(range_text, total_pages) {
            Ok(tokens) => PageSelectionResult::selected(expand(&tokens)),
            Err(err) => PageSelectionResult::rejected(err),
        },
    };

    tracing::debug!(
        %mode,
        range = range_text,
        total_pages,
        selected = result.page_count(),
        error = ?result.error(),
        "Resolved page selection"
    );

    result
}

/// Parses a range expression into its valid tokens, left to right.
///
/// # Errors
/// Returns the out-of-bounds error for the first offending segment; later
/// segments are not examined.
pub fn tokenize(range_text: &str, total_pages: u32) -> Result<Vec<PageRangeToken>, RangeError> {
    let mut tokens = Vec::new();

    for segment in range_text.split(',') {
        match classify(segment.trim(), total_pages) {
            Segment::Page(token) => tokens.push(token),
            Segment::OutOfBounds(requested) => {
                return Err(RangeError::PageOutOfBounds {
                    requested,
                    total_pages,
                });
            }
            Segment::Ignored => {}
        }
    }

    Ok(tokens)
}

/// Unions the pages named by `tokens`, ascending and unique.
fn expand(tokens: &[PageRangeToken]) -> Vec<u32> {
    let mut pages = BTreeSet::new();
    for token in tokens {
        match *token {
            PageRangeToken::Single(page) => {
                pages.insert(page);
            }
            PageRangeToken::Range { start, end } => pages.extend(start..=end),
        }
    }
    pages.into_iter().collect()
}

fn classify(segment: &str, total_pages: u32) -> Segment {
    let limit = u64::from(total_pages);

    if segment.contains('-') {
        let mut bounds = segment.split('-').map(parse_page_number);
        let (Some(Some(start)), Some(Some(end))) = (bounds.next(), bounds.next()) else {
            return Segment::Ignored;
        };
        if start > limit || end > limit {
            return Segment::OutOfBounds(start.max(end));
        }
        if start == 0 || start > end {
            return Segment::Ignored;
        }
        // Both bounds are <= total_pages, so they fit in u32.
        match (u32::try_from(start), u32::try_from(end)) {
            (Ok(start), Ok(end)) => Segment::Page(PageRangeToken::Range { start, end }),
            _ => Segment::Ignored,
        }
    } else {
        let Some(page) = parse_page_number(segment) else {
            return Segment::Ignored;
        };
        if page > limit {
            return Segment::OutOfBounds(page);
        }
        match u32::try_from(page) {
            Ok(page) if page > 0 => Segment::Page(PageRangeToken::Single(page)),
            _ => Segment::Ignored,
        }
    }
}

/// Reads the leading decimal number of `raw`, ignoring whatever follows.
///
/// Returns `None` only when there are no leading digits. Digit runs too long
/// for `u64` saturate, so they still count as out of bounds.
fn parse_page_number(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);

    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn custom(text: &str, total: u32) -> PageSelectionResult {
        resolve(PageSelectionMode::Custom, text, total)
    }

    #[test]
    fn test_all_ignores_range_text() {
        let result = resolve(PageSelectionMode::All, "garbage,99", 4);
        assert_eq!(result.pages(), &[1, 2, 3, 4]);
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_empty_custom_range_selects_nothing() {
        let result = custom("", 10);
        assert!(result.is_empty());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_mixed_ranges() {
        let result = custom("1-5,8,11-13", 20);
        assert_eq!(result.pages(), &[1, 2, 3, 4, 5, 8, 11, 12, 13]);
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_overlapping_ranges_are_deduplicated() {
        assert_eq!(custom("1-3,2-4", 5).pages(), &[1, 2, 3, 4]);
        assert_eq!(custom("5,1,5,3", 5).pages(), &[1, 3, 5]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(custom(" 1 - 2 , 4 ", 5).pages(), &[1, 2, 4]);
    }

    #[test]
    fn test_range_past_end_is_rejected() {
        let result = custom("3-10", 5);
        assert!(result.is_empty());
        assert_eq!(
            result.error(),
            Some(RangeError::PageOutOfBounds {
                requested: 10,
                total_pages: 5
            })
        );
    }

    #[test]
    fn test_first_offending_token_wins() {
        let result = custom("1,7,2-9", 5);
        assert_eq!(
            result.error(),
            Some(RangeError::PageOutOfBounds {
                requested: 7,
                total_pages: 5
            })
        );
    }

    #[test]
    fn test_reversed_range_past_end_reports_larger_bound() {
        let result = custom("12-3", 5);
        assert_eq!(
            result.error(),
            Some(RangeError::PageOutOfBounds {
                requested: 12,
                total_pages: 5
            })
        );
    }

    #[test]
    fn test_malformed_tokens_are_ignored() {
        let result = custom("abc,2,x-3,4-2,0,,-1,3-,.5", 5);
        assert_eq!(result.pages(), &[2]);
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_trailing_garbage_keeps_leading_number() {
        assert_eq!(custom("2x", 5).pages(), &[2]);
        assert_eq!(custom("2.5", 5).pages(), &[2]);
        assert_eq!(custom("+3, 4 pages", 5).pages(), &[3, 4]);
        assert_eq!(custom("1a-3b", 5).pages(), &[1, 2, 3]);
    }

    #[test]
    fn test_extra_range_parts_are_dropped() {
        let result = custom("1-2-3", 5);
        assert_eq!(result.pages(), &[1, 2]);
        assert_eq!(result.error(), None);
        assert_eq!(custom("4-5-99", 5).pages(), &[4, 5]);
    }

    #[test]
    fn test_out_of_bounds_number_with_suffix_is_rejected() {
        let result = custom("3abc", 2);
        assert!(result.is_empty());
        assert_eq!(
            result.error(),
            Some(RangeError::PageOutOfBounds {
                requested: 3,
                total_pages: 2
            })
        );
        assert_eq!(
            custom("1-9.5", 4).error(),
            Some(RangeError::PageOutOfBounds {
                requested: 9,
                total_pages: 4
            })
        );
    }

    #[test]
    fn test_only_malformed_tokens_select_nothing() {
        let result = custom("foo", 5);
        assert!(result.is_empty());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_huge_page_number_is_out_of_bounds() {
        let result = custom("99999999999999999999999", 5);
        assert_eq!(
            result.error(),
            Some(RangeError::PageOutOfBounds {
                requested: u64::MAX,
                total_pages: 5
            })
        );
    }

    #[test]
    fn test_tokenize_keeps_order() {
        let tokens = tokenize("4,1-2", 5).unwrap();
        assert_eq!(
            tokens,
            vec![
                PageRangeToken::Single(4),
                PageRangeToken::Range { start: 1, end: 2 }
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_all_selects_every_page(total in 1u32..500) {
            let result = resolve(PageSelectionMode::All, "", total);
            prop_assert_eq!(result.page_count(), total as usize);
            prop_assert_eq!(result.pages().first().copied(), Some(1));
            prop_assert_eq!(result.pages().last().copied(), Some(total));
        }

        #[test]
        fn prop_custom_pages_are_strictly_ascending(
            text in "[0-9, \\-]{0,40}",
            total in 1u32..60,
        ) {
            let result = custom(&text, total);
            prop_assert!(result.pages().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(result.pages().iter().all(|&p| p >= 1 && p <= total));
            prop_assert!(result.error().is_none() || result.is_empty());
        }

        #[test]
        fn prop_resolve_is_deterministic(
            text in "[0-9a-z, \\-]{0,40}",
            total in 1u32..60,
        ) {
            prop_assert_eq!(custom(&text, total), custom(&text, total));
        }
    }
}
