//! Candidate filtering and guess selection.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    corpus::Corpus,
    feedback::{FeedbackEntry, Status},
};

/// Narrows the corpus to the words consistent with accumulated feedback and
/// selects the next guess.
///
/// The filter carries no state of its own beyond a borrow of the corpus:
/// the feedback log is the single source of truth, and the candidate set is
/// recomputed from the full corpus on every call. That makes
/// [`filter_words()`](Filter::filter_words) idempotent and keeps
/// correctness independent of turn ordering, at a cost of
/// O(corpus × feedback) per turn, which is cheap for corpora of a few
/// thousand words.
///
/// # Examples
///
/// ```rust
/// use wordle_filter::{Corpus, FeedbackEntry, Filter, Status};
///
/// let corpus = Corpus::from_entries([("crane", 10.0), ("slate", 50.0), ("adieu", 5.0)]);
/// let filter = Filter::new(&corpus);
///
/// let feedback = [FeedbackEntry::new(4, 'e', Status::Correct)];
/// let candidates = filter.filter_words(&feedback);
/// assert!(candidates.contains("crane") && candidates.contains("slate"));
///
/// assert_eq!(filter.best_guess(&candidates), Some("slate"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Filter<'a> {
    corpus: &'a Corpus,
}

impl<'a> Filter<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Filter { corpus }
    }

    /// Computes the set of corpus words consistent with every feedback
    /// entry received so far.
    ///
    /// Callers must pass the cumulative feedback log from all prior
    /// guesses, not just the latest guess's entries. With an empty log this
    /// returns the full normalized word list.
    ///
    /// Three facts are derived from the log, and a word survives only if
    /// it violates none of them:
    ///
    /// 1. every `Correct` entry's letter appears at exactly that position;
    /// 2. every `Present` entry's letter appears somewhere in the word but
    ///    not at that position;
    /// 3. no letter appears that was marked `Absent` *without* also being
    ///    marked correct or present anywhere in the log. The exclusion
    ///    handles repeated letters: when a guess contains a letter twice
    ///    and the answer once, the extra copy grades absent, and that
    ///    signal must not eliminate words that contain the letter once.
    pub fn filter_words(&self, feedback: &[FeedbackEntry]) -> BTreeSet<String> {
        if feedback.is_empty() {
            return self.corpus.words().map(str::to_owned).collect();
        }

        let facts = Facts::from_feedback(feedback);
        self.corpus
            .words()
            .filter(|word| facts.allows(word))
            .map(str::to_owned)
            .collect()
    }

    /// Picks the candidate with the highest corpus frequency.
    ///
    /// Returns `None` on an empty candidate set; callers must treat that as
    /// "no valid words remain" and stop guessing. Equal scores resolve to
    /// the lexicographically smallest word, so selection is reproducible.
    pub fn best_guess<'c>(&self, candidates: &'c BTreeSet<String>) -> Option<&'c str> {
        self.best_guess_with(candidates, |word| self.corpus.frequency(word))
    }

    /// Picks the best candidate under an injected scoring function.
    ///
    /// This is the seam for replacing the frequency heuristic with another
    /// ranking policy without touching the filter. Words the scorer returns
    /// `None` (or NaN) for are skipped; if no candidate receives a score at
    /// all, the lexicographically smallest candidate is returned rather
    /// than nothing, since the set itself is known to be non-empty.
    pub fn best_guess_with<'c>(
        &self,
        candidates: &'c BTreeSet<String>,
        score: impl Fn(&str) -> Option<f64>,
    ) -> Option<&'c str> {
        let mut best: Option<(&str, f64)> = None;
        for word in candidates {
            if let Some(value) = score(word) {
                if value.is_nan() {
                    continue;
                }
                match best {
                    Some((_, top)) if value <= top => {}
                    _ => best = Some((word, value)),
                }
            }
        }

        best.map(|(word, _)| word)
            .or_else(|| candidates.iter().next().map(String::as_str))
    }
}

/// The three facts derived from a feedback log, with contradictory signals
/// for the same letter already reconciled.
#[derive(Debug, Default)]
struct Facts {
    correct: HashMap<usize, char>,
    present: Vec<(usize, char)>,
    absent: HashSet<char>,
}

impl Facts {
    fn from_feedback(feedback: &[FeedbackEntry]) -> Self {
        let mut facts = Facts::default();
        let mut known = HashSet::new();

        for entry in feedback {
            match entry.status {
                Status::Correct => {
                    facts.correct.insert(entry.position, entry.letter);
                    known.insert(entry.letter);
                }
                Status::Present => {
                    facts.present.push((entry.position, entry.letter));
                    known.insert(entry.letter);
                }
                Status::Absent => {
                    facts.absent.insert(entry.letter);
                }
            }
        }

        // A letter graded correct or present anywhere in the log stays in
        // play even if another copy of it graded absent.
        facts.absent.retain(|letter| !known.contains(letter));
        facts
    }

    fn allows(&self, word: &str) -> bool {
        let letters: Vec<char> = word.chars().collect();

        // `get` rather than indexing: feedback is trusted by contract, but
        // an out-of-range position should reject, not panic.
        self.correct
            .iter()
            .all(|(&position, &letter)| letters.get(position) == Some(&letter))
            && self.present.iter().all(|&(position, letter)| {
                letters.contains(&letter) && letters.get(position) != Some(&letter)
            })
            && !letters.iter().any(|letter| self.absent.contains(letter))
    }
}
