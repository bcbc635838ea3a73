//! Constraint-driven placement of elements on a fixed-size canvas
//!
//! The pipeline: constraint lines are parsed into declarations, registered
//! against the element registry, evaluated in dependency order, and finally
//! each element's rectangle is derived from whichever edge slots the
//! constraints filled in.

pub mod config;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod types;

pub use config::LayoutConfig;
pub use constraint::{Constraint, EdgeKey};
pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use types::{EdgeStore, Element, Rect, Registry};

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 0..=m {
        dp[i][0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Find similar identifiers within a maximum edit distance
pub(crate) fn find_similar<'a>(
    defined: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = defined
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            if dist <= max_distance && dist > 0 {
                Some((name.to_string(), dist))
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}
