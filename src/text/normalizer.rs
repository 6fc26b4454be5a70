use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Matches every character that is neither a word character nor whitespace,
/// plus combining marks, which `\w` would otherwise keep
const PUNCTUATION_PATTERN: &str = r"[^\w\s]|\p{M}";

/// Matches one word token in already-cleaned text
const WORD_PATTERN: &str = r"\w+";

/// Display form of a question: cleaned text plus its word tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    /// Lowercased, punctuation-free copy of the input
    pub text: String,
    /// Word tokens split from `text`, in order
    pub tokens: Vec<String>,
}

/// Produces the cleaned, tokenized form of user input shown for debugging.
///
/// The result never feeds back into a request to the model.
/// All patterns are compiled in [`Normalizer::new`], so a broken tokenizer
/// shows up at startup rather than on the first question.
#[derive(Debug, Clone)]
pub struct Normalizer {
    punctuation: Regex,
    word: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        let normalizer = Self {
            punctuation: Regex::new(PUNCTUATION_PATTERN)?,
            word: Regex::new(WORD_PATTERN)?,
        };
        debug!("Normalizer ready");
        Ok(normalizer)
    }

    /// Lowercases, strips punctuation and tokenizes `input`.
    ///
    /// Apostrophes and hyphens inside words are removed too, so
    /// `"Don't re-run"` becomes `"dont rerun"` and `"2+2"` becomes `"22"`.
    pub fn normalize(&self, input: &str) -> Normalized {
        let lowered = input.to_lowercase();
        let text = self.punctuation.replace_all(&lowered, "").into_owned();
        let tokens = self
            .word
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect();

        Normalized { text, tokens }
    }
}
