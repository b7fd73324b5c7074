//! Input preprocessing: normalization and tokenization.
//!
//! Every classifier and detector works on the same preprocessed view of the
//! input, produced exactly once per analysis:
//! - `normalize`: lowercase + condensed whitespace (patterns match this form)
//! - `tokenize`: alphanumeric tokens, lower-case (flagged-word scans use these)

/// Lowercase the input and collapse runs of whitespace into single spaces.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(lc);
            last_space = false;
        }
    }
    out.trim().to_string()
}

/// Alphanumeric tokens, lower-case. Punctuation is stripped by splitting.
pub fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

/// Word count over alphanumeric tokens.
pub fn word_count(s: &str) -> usize {
    tokenize(s).count()
}

/// True if the text contains terminal punctuation (`.`, `!` or `?`).
pub fn has_terminal_punctuation(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '.' | '!' | '?'))
}

/// One preprocessed view shared by classifiers and detectors.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Original input, untouched (reports echo it back).
    pub raw: String,
    /// Normalized form all regex matching runs against.
    pub normalized: String,
    /// Lower-case alphanumeric tokens.
    pub tokens: Vec<String>,
}

impl Preprocessed {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let tokens = tokenize(&normalized).collect();
        Self {
            raw: raw.to_string(),
            normalized,
            tokens,
        }
    }
}
