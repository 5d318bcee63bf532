// Hyphenator.
//
// Per content word: words without a single category-L codepoint pass
// through untouched. Linguistic words are NFC-normalized and resolved
// through a three-stage chain -- the in-memory cache, the specialized
// word list, the pattern set -- and the decision is always written back
// to the cache, which doubles as the source of the word-list export.
//
// All state lives in the `Hyphenator` context struct; there are no
// process-wide singletons, so embedding the filter as a library is a
// matter of owning one value.

pub mod patterns;
pub mod wordlist;

use hashbrown::HashMap;
use icu_normalizer::ComposingNormalizer;

use weft_core::charclass::{is_letter, GRAVE_ACCENT, SOFT_HYPHEN};
use weft_core::error::WeftError;

pub use patterns::{PatternSet, PatternStyle, TexPatterns};

pub struct Hyphenator<P: PatternSet> {
    patterns: Option<P>,
    special: Option<HashMap<String, String>>,
    cache: HashMap<String, String>,
    nfc: ComposingNormalizer,
}

impl<P: PatternSet> Hyphenator<P> {
    pub fn new(patterns: Option<P>, special: Option<HashMap<String, String>>) -> Self {
        Self {
            patterns,
            special,
            cache: HashMap::new(),
            nfc: ComposingNormalizer::new_nfc(),
        }
    }

    /// Transform one content word.
    pub fn hyphenate_word(&mut self, word: &str) -> Result<String, WeftError> {
        if !word.chars().any(is_letter) {
            return Ok(word.to_string());
        }
        for c in word.chars() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                return Err(WeftError::WordSyntax(format!(
                    "whitespace inside word {word:?}"
                )));
            }
            if c == GRAVE_ACCENT {
                return Err(WeftError::WordSyntax(format!(
                    "grave accent inside word {word:?}"
                )));
            }
        }

        let key = self.nfc.normalize(word);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        let value = match self.special.as_ref().and_then(|list| list.get(&key)) {
            Some(listed) => listed.clone(),
            None => match &self.patterns {
                Some(patterns) => {
                    let chars: Vec<char> = key.chars().collect();
                    insert_soft_hyphens(&chars, &patterns.split_offsets(&chars))
                }
                None => key.clone(),
            },
        };
        self.cache.insert(key, value.clone());
        Ok(value)
    }

    /// The cache, for the word-list export.
    pub fn cache(&self) -> &HashMap<String, String> {
        &self.cache
    }
}

/// Insert a soft hyphen before each listed codepoint offset.
fn insert_soft_hyphens(word: &[char], offsets: &[usize]) -> String {
    let mut out = String::with_capacity(word.len() + offsets.len());
    let mut next = offsets.iter().peekable();
    for (i, &c) in word.iter().enumerate() {
        if next.peek() == Some(&&i) {
            out.push(SOFT_HYPHEN);
            next.next();
        }
        out.push(c);
    }
    out
}
