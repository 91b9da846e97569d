/// Target word list.
///
/// ## Sources (priority order):
///   1. `fixed_word` from config (every round plays the same word)
///   2. JSON word file, e.g. `target-words.json`: `["APFEL", "Birne", ...]`
///   3. Built-in embedded list
///
/// Entries are trimmed and case-folded. Anything that is not exactly
/// five playable letters is skipped with a warning.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::letter::{fold_letter, is_letter, ROW_LEN};

const EMBEDDED_WORDS: &[&str] = &[
    "APFEL", "BIRNE", "TRAUM", "HÜGEL", "KÄLTE", "BLUME", "STEIN", "WOLKE",
    "FEUER", "NACHT", "LICHT", "MÖWEN", "KRONE", "LAMPE", "TISCH", "FARBE",
    "REGEN", "SONNE", "VOGEL", "MÜCKE", "GRÜßE", "KÄFER", "TÜREN", "ÄRGER",
];

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse word list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("word list {path} has no valid {len}-letter words")]
    Empty { path: PathBuf, len: usize },

    #[error("fixed word {word:?} is not {len} playable letters")]
    InvalidFixed { word: String, len: usize },
}

pub struct WordList {
    words: Vec<String>,
    rng: StdRng,
}

impl WordList {
    /// Built-in list.
    pub fn embedded() -> Self {
        let words = EMBEDDED_WORDS.iter().filter_map(|w| normalize(w)).collect();
        WordList::from_words(words)
    }

    /// A list that always yields the same word.
    pub fn fixed(word: &str) -> Result<Self, WordListError> {
        let word = normalize(word).ok_or_else(|| WordListError::InvalidFixed {
            word: word.to_string(),
            len: ROW_LEN,
        })?;
        Ok(WordList::from_words(vec![word]))
    }

    /// Load a JSON array of strings. A missing file yields the embedded list.
    pub fn load(path: &Path) -> Result<Self, WordListError> {
        if !path.exists() {
            debug!(path = %path.display(), "word list not found, using embedded words");
            return Ok(WordList::embedded());
        }
        let text = std::fs::read_to_string(path).map_err(|source| WordListError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        WordList::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, WordListError> {
        let raw: Vec<String> = serde_json::from_str(text).map_err(|source| WordListError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut words = Vec::with_capacity(raw.len());
        for entry in &raw {
            match normalize(entry) {
                Some(w) => words.push(w),
                None => warn!(entry = %entry, "skipping invalid target word"),
            }
        }

        if words.is_empty() {
            return Err(WordListError::Empty { path: path.to_path_buf(), len: ROW_LEN });
        }
        debug!(count = words.len(), skipped = raw.len() - words.len(), "word list loaded");
        Ok(WordList::from_words(words))
    }

    fn from_words(words: Vec<String>) -> Self {
        WordList { words, rng: StdRng::from_entropy() }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Pick the target for the next round.
    pub fn pick(&mut self) -> String {
        self.words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| EMBEDDED_WORDS[0].to_string())
    }
}

/// Trim and case-fold; `None` unless exactly `ROW_LEN` playable letters.
fn normalize(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    let valid = trimmed.chars().count() == ROW_LEN && trimmed.chars().all(is_letter);
    valid.then(|| trimmed.chars().map(fold_letter).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalize_filters_and_folds() {
        assert_eq!(normalize(" apfel "), Some("APFEL".to_string()));
        assert_eq!(normalize("Spaß!"), None);
        assert_eq!(normalize("spaßt"), Some("SPAßT".to_string()));
        assert_eq!(normalize("äpfel"), Some("ÄPFEL".to_string()));
        assert_eq!(normalize("wasser"), None);
        assert_eq!(normalize("b1rne"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn embedded_words_are_all_playable() {
        let list = WordList::embedded();
        assert_eq!(list.len(), EMBEDDED_WORDS.len());
        assert!(list.words().iter().all(|w| w.chars().count() == ROW_LEN));
    }

    #[test]
    fn fixed_always_picks_same_word() {
        let mut list = WordList::fixed(" apfel ").unwrap();
        for _ in 0..5 {
            assert_eq!(list.pick(), "APFEL");
        }
    }

    #[test]
    fn fixed_rejects_wrong_length_or_non_letters() {
        for bad in ["haus", "wasser", "ap3el", ""] {
            let err = WordList::fixed(bad).err().unwrap();
            assert!(matches!(err, WordListError::InvalidFixed { len: ROW_LEN, .. }), "{bad}");
        }
    }

    #[test]
    fn load_json_skips_bad_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["birne", "zu lang", "1234", "Hügel"]"#).unwrap();
        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.words(), &["BIRNE".to_string(), "HÜGEL".to_string()]);
    }

    #[test]
    fn load_rejects_list_without_valid_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["ab", "toolong"]"#).unwrap();
        let err = WordList::load(file.path()).err().unwrap();
        assert!(matches!(err, WordListError::Empty { len: ROW_LEN, .. }));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = WordList::load(file.path()).err().unwrap();
        assert!(matches!(err, WordListError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let list = WordList::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(list.len(), WordList::embedded().len());
    }

    #[test]
    fn pick_comes_from_list() {
        let mut list = WordList::embedded();
        let w = list.pick();
        assert!(list.words().contains(&w));
    }
}
