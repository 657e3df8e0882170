//! Entry splitter

use once_cell::sync::Lazy;
use regex::Regex;

use super::STARTERS;

/// A bare size prefix glued to the first starter, as in "M-Designed & Custom White T-Shirt".
static SIZE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[SMLX]+-$").unwrap());

/// Split a raw product line into one substring per purchased item.
///
/// Entries begin at a starter phrase and run to the next one. Text before the first starter is
/// its own entry unless it is a bare size prefix, which stays glued to the first one. A line
/// without any starter is a single entry.
pub fn split_product_line(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return vec![];
    }

    let mut bounds = starter_positions(raw);
    if bounds.is_empty() {
        return vec![raw.to_string()];
    }

    if bounds[0] > 0 && SIZE_PREFIX_RE.is_match(&raw[..bounds[0]]) {
        bounds[0] = 0;
    } else {
        bounds.insert(0, 0);
    }
    bounds.push(raw.len());

    bounds
        .windows(2)
        .map(|w| clean_entry(&raw[w[0]..w[1]]))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Byte offsets of every starter phrase, leftmost first, never overlapping.
fn starter_positions(raw: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut pos = 0;
    while pos < raw.len() {
        let rest = &raw[pos..];
        match STARTERS.iter().find(|starter| rest.starts_with(**starter)) {
            Some(starter) => {
                positions.push(pos);
                pos += starter.len();
            }
            None => pos += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    positions
}

fn clean_entry(entry: &str) -> &str {
    entry.trim().trim_end_matches(|c: char| c == ',' || c.is_whitespace())
}
