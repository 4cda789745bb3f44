/*!
 * Recovery of revised words that precede the local alignment.
 *
 * Local alignment may start after the first revised word, dropping a leading
 * run that had no good match (a rewritten opening line, for instance). The
 * recovery pass puts those words back in front of the first segment.
 */

use std::collections::HashSet;

use super::normalizer::{normalize, WordToken};

/// Result of the recovery pass over the first segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRecovery {
    /// First segment text with any missing prefix prepended
    pub text: String,
    /// Number of revised words prepended
    pub prepended_words: usize,
    /// Whether a revised word matching the first segment was found
    pub stop_found: bool,
}

/// Prepend leading revised words missing from the first segment
///
/// Scans `full_revised` from the start and stops at the first word whose
/// comparison form appears in `first_segment_text`. Everything before it is
/// prepended. When no word matches, every revised word has been collected and
/// all of them are prepended; `stop_found` is false in that case.
pub fn recover_prefix(full_revised: &[WordToken], first_segment_text: &str) -> PrefixRecovery {
    let present: HashSet<String> = first_segment_text
        .split_whitespace()
        .map(normalize)
        .filter(|form| !form.is_empty())
        .collect();

    let stop = full_revised
        .iter()
        .position(|word| word.is_comparable() && present.contains(word.comparison_form()));
    let missing = &full_revised[..stop.unwrap_or(full_revised.len())];

    let text = if missing.is_empty() {
        first_segment_text.to_string()
    } else {
        let mut words: Vec<&str> = missing.iter().map(WordToken::text).collect();
        if !first_segment_text.is_empty() {
            words.push(first_segment_text);
        }
        words.join(" ")
    };

    PrefixRecovery {
        text,
        prepended_words: missing.len(),
        stop_found: stop.is_some(),
    }
}
