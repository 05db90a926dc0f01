//! Loading and storing the word corpus.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::{CorpusError, Result, WORD_LENGTH};

/// The static table of valid words and their frequency scores.
///
/// A corpus is loaded once at startup and shared read-only for the rest of
/// the run. Words are lowercased at load, and rows whose word is not
/// [`WORD_LENGTH`] characters long are dropped silently, since a general
/// frequency list legitimately contains words of many lengths.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use wordle_filter::Corpus;
///
/// let source = "word,frequency\nCRANE,10.5\nslate,50\nox,900\n";
/// let corpus = Corpus::from_reader(Cursor::new(source))?;
///
/// assert_eq!(corpus.len(), 2); // "ox" is not five letters
/// assert!(corpus.contains("crane"));
/// assert_eq!(corpus.frequency("slate"), Some(50.0));
/// #
/// # Ok::<_, wordle_filter::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<String>,
    frequencies: HashMap<String, f64>,
}

impl Corpus {
    /// Loads a corpus from a CSV file at `path`.
    ///
    /// A missing or unreadable file is a [`CorpusError::Io`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).map_err(CorpusError::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a corpus from any CSV source.
    ///
    /// The first line must be a header naming (at least) `word` and
    /// `frequency` columns; column order does not matter and extra columns
    /// are ignored. Returns an error if either required column is missing
    /// or a frequency cell does not parse as a number.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let header = match lines.next() {
            Some((_, line)) => line.map_err(CorpusError::Io)?,
            None => return Err(CorpusError::MissingHeader.into()),
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let column = |name: &'static str| -> Result<usize> {
            columns
                .iter()
                .position(|&c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| CorpusError::MissingColumn(name).into())
        };
        let word_column = column("word")?;
        let frequency_column = column("frequency")?;

        let mut words = Vec::new();
        let mut frequencies = HashMap::new();
        for (index, line) in lines {
            let line = line.map_err(CorpusError::Io)?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let (word, frequency) = match (fields.get(word_column), fields.get(frequency_column)) {
                (Some(&word), Some(&frequency)) => (word, frequency),
                _ => return Err(CorpusError::MissingField { line: index + 1 }.into()),
            };

            if word.chars().count() != WORD_LENGTH {
                continue;
            }
            let frequency: f64 = frequency.parse().map_err(|source| CorpusError::Frequency {
                line: index + 1,
                source,
            })?;

            let word = word.to_lowercase();
            // A repeated word keeps its first position but takes the later
            // row's frequency.
            if frequencies.insert(word.clone(), frequency).is_none() {
                words.push(word);
            }
        }

        debug!("loaded corpus of {} {}-letter words", words.len(), WORD_LENGTH);
        Ok(Corpus { words, frequencies })
    }

    /// Builds a corpus from in-memory `(word, frequency)` pairs.
    ///
    /// Applies the same length filter and normalization as
    /// [`from_reader()`](Corpus::from_reader). Mostly useful for tests and
    /// for callers that embed their word list.
    pub fn from_entries<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut words = Vec::new();
        let mut frequencies = HashMap::new();
        for (word, frequency) in entries {
            let word = word.as_ref().trim();
            if word.chars().count() != WORD_LENGTH {
                continue;
            }
            let word = word.to_lowercase();
            if frequencies.insert(word.clone(), frequency).is_none() {
                words.push(word);
            }
        }
        Corpus { words, frequencies }
    }

    /// Returns an iterator over the normalized words, in load order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Looks up the frequency score for a normalized word.
    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    /// Returns true if `word` (already normalized) is in the corpus.
    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    /// The number of words in the corpus.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the corpus holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
