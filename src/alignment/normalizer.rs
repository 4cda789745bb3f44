/*!
 * Comparison forms for words.
 *
 * A comparison form is the NFC-composed, lowercased word with everything but
 * Latin-script letters removed. Two words match only when their comparison
 * forms are equal and non-empty, so punctuation-only tokens never match.
 */

use unicode_normalization::UnicodeNormalization;

/// Compute the comparison form of a word
pub fn normalize(word: &str) -> String {
    word.nfc()
        .filter(|c| is_latin_letter(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether two raw words match after normalization
pub fn words_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    !a.is_empty() && a == normalize(b)
}

/// Latin letters: ASCII, Latin-1 Supplement, Extended-A/B and Extended Additional
fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (c.is_alphabetic() && matches!(c as u32, 0x00C0..=0x024F | 0x1E00..=0x1EFF))
}

/// A word as written plus its cached comparison form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    text: String,
    comparison: String,
}

impl WordToken {
    /// Create a token, computing its comparison form once
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let comparison = normalize(&text);
        Self { text, comparison }
    }

    /// Build tokens from a sequence of words
    pub fn from_words<I, S>(words: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        words.into_iter().map(Self::new).collect()
    }

    /// The word as it appears in the source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized form used for equality tests
    pub fn comparison_form(&self) -> &str {
        &self.comparison
    }

    /// Whether this token can ever match another one
    pub fn is_comparable(&self) -> bool {
        !self.comparison.is_empty()
    }

    /// Match test used by the alignment recurrence
    pub fn matches(&self, other: &WordToken) -> bool {
        self.is_comparable() && self.comparison == other.comparison
    }
}
