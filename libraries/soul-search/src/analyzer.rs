//! Text analyzer shared by indexing and querying
//!
//! Pipeline: ASCII folding (NFKD, combining marks dropped) -> Unicode word
//! segmentation -> lowercase. Running the exact same pipeline on both sides
//! is what makes "Café" and "cafe" the same term.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// One analyzed term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized term text
    pub text: String,
    /// Word position of the first word this token covers
    pub position: u32,
    /// Number of word positions covered (more than 1 for joined compounds)
    pub span: u32,
}

impl Token {
    /// Whether this token is the joined form of a compound word
    pub fn is_compound(&self) -> bool {
        self.span > 1
    }
}

/// Fold diacritics and special letters down to ASCII where possible
///
/// Characters without an ASCII counterpart (CJK, Cyrillic, ...) pass through.
pub fn fold_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkd() {
        if is_combining_mark(c) {
            continue;
        }
        match c {
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'ß' => out.push_str("ss"),
            'ẞ' => out.push_str("SS"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'đ' => out.push('d'),
            'Đ' => out.push('D'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'þ' => out.push_str("th"),
            'Þ' => out.push_str("TH"),
            'ı' => out.push('i'),
            _ => out.push(c),
        }
    }
    out
}

/// Analyze text into positioned terms
///
/// Words glued together by punctuation inside one whitespace-separated chunk
/// (`Lo-Fi`, `AC/DC`) yield their parts plus the joined form, so both
/// "lo fi" and "lofi" find them.
pub fn analyze(text: &str) -> Vec<Token> {
    let folded = fold_diacritics(text);
    let mut tokens = Vec::new();
    let mut position: u32 = 0;

    for chunk in folded.split_whitespace() {
        let parts: Vec<String> = chunk
            .unicode_words()
            .flat_map(|word| word.split(is_word_separator))
            .map(normalize_word)
            .filter(|w| !w.is_empty())
            .collect();

        if parts.is_empty() {
            continue;
        }

        let span = u32::try_from(parts.len()).unwrap_or(u32::MAX);
        if span > 1 && parts.iter().all(|p| p.is_ascii()) {
            tokens.push(Token {
                text: parts.concat(),
                position,
                span,
            });
        }

        for part in parts {
            tokens.push(Token {
                text: part,
                position,
                span: 1,
            });
            position = position.saturating_add(1);
        }
    }

    tokens
}

/// Word-internal punctuation that still separates words (`genre:jazz`)
///
/// Apostrophes and periods stay inside words so `don't` and `R.E.M.` are one term.
fn is_word_separator(c: char) -> bool {
    !(c.is_alphanumeric() || matches!(c, '\'' | '\u{2019}' | '.' | '_'))
}

fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
