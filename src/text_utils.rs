/*!
 * Text preprocessing for revised transcripts.
 *
 * Stateless string transforms applied before tokenization:
 * - whitespace collapsing (line breaks and runs of whitespace become one space)
 * - typographic quote curling
 * - em dash substitution
 * - removal of inline formatting tags from cue text
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::TextConfig;

// @const: Any run of whitespace, line breaks included
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @const: Two or more hyphens used as a dash
static DOUBLE_HYPHEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-{2,}").unwrap()
});

// @const: Single hyphen surrounded by spaces
static SPACED_HYPHEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S) - (\S)").unwrap()
});

// @const: HTML-style tags and ASS override blocks found in cue text
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>|\{\\[^}]*\}").unwrap()
});

/// Remove inline formatting tags such as `<i>` or `{\an8}`
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Collapse line breaks and runs of whitespace into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Replace straight quotes with opening or closing typographic quotes
///
/// A quote opens when it starts the text or follows whitespace, an opening
/// bracket, a dash or another opening quote. Otherwise it closes, which turns
/// apostrophes inside words into `’`.
pub fn curl_quotes(text: &str) -> String {
    let mut curled = String::with_capacity(text.len());
    let mut previous: Option<char> = None;

    for c in text.chars() {
        let opens = previous.is_none_or(|p| {
            p.is_whitespace() || matches!(p, '(' | '[' | '{' | '-' | '–' | '—' | '“' | '‘')
        });

        let pushed = match c {
            '"' if opens => '“',
            '"' => '”',
            '\'' if opens => '‘',
            '\'' => '’',
            _ => c,
        };

        curled.push(pushed);
        previous = Some(pushed);
    }

    curled
}

/// Replace double hyphens and spaced single hyphens with em dashes
pub fn replace_dashes(text: &str) -> String {
    let text = DOUBLE_HYPHEN_REGEX.replace_all(text, "—");
    // Applied twice so that chains like "a - b - c" are fully converted
    let text = SPACED_HYPHEN_REGEX.replace_all(&text, "$1 — $2");
    SPACED_HYPHEN_REGEX.replace_all(&text, "$1 — $2").into_owned()
}

/// Apply the configured transforms and collapse whitespace
pub fn prepare_text(text: &str, config: &TextConfig) -> String {
    let mut prepared = collapse_whitespace(text);

    if config.replace_dashes {
        prepared = replace_dashes(&prepared);
    }

    if config.curl_quotes {
        prepared = curl_quotes(&prepared);
    }

    prepared
}

/// Split text into words on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
