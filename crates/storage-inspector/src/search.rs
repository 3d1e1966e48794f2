//! Search integration for the value-display region.

use serde::{Deserialize, Serialize};

/// Action names the devtools search box reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    PerformSearch,
    CancelSearch,
    NextSearchResult,
    PreviousSearchResult,
    Other(String),
}

impl SearchAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "performSearch" => SearchAction::PerformSearch,
            "cancelSearch" => SearchAction::CancelSearch,
            "nextSearchResult" => SearchAction::NextSearchResult,
            "previousSearchResult" => SearchAction::PreviousSearchResult,
            other => SearchAction::Other(other.to_string()),
        }
    }
}

/// Range of one match within the displayed text, in UTF-16 code units like
/// the page's own string indices and the metadata strip's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

/// Highlights to apply for a search event: matches for a non-empty
/// `performSearch`, nothing otherwise.
pub fn highlights_for(action: &SearchAction, keyword: &str, text: &str) -> Vec<MatchRange> {
    match action {
        SearchAction::PerformSearch if !keyword.is_empty() => find_matches(text, keyword),
        _ => Vec::new(),
    }
}

/// Case-insensitive, non-overlapping occurrences of `keyword` in `text`.
pub fn find_matches(text: &str, keyword: &str) -> Vec<MatchRange> {
    let needle: Vec<char> = keyword.chars().map(fold_case).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut offset = 0;
    let hay: Vec<(usize, char)> = text
        .chars()
        .map(|c| {
            let start = offset;
            offset += c.len_utf16();
            (start, fold_case(c))
        })
        .collect();
    let text_len = offset;

    let mut matches = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let window = &hay[i..i + needle.len()];
        if window.iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            let start = hay[i].0;
            let end = hay
                .get(i + needle.len())
                .map(|(offset, _)| *offset)
                .unwrap_or(text_len);
            matches.push(MatchRange { start, end });
            i += needle.len();
        } else {
            i += 1;
        }
    }
    matches
}

// Characters whose lowercase form is more than one char compare as themselves.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}
