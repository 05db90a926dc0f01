//! Driving a full game through the interaction-layer seam.

use std::collections::BTreeSet;

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    corpus::Corpus,
    feedback::{grade, FeedbackEntry, Status},
    filter::Filter,
    Result, MAX_ATTEMPTS,
};

/// The opening guess played before any feedback exists.
pub const DEFAULT_OPENING_GUESS: &str = "slant";

/// The seam between the solving core and whatever actually plays guesses.
///
/// A browser-automation layer implements this by typing the word into the
/// live game and scraping the per-tile verdicts; [`ScriptedGame`] implements
/// it locally against a known answer. Implementations must return exactly
/// one entry per letter position and may use
/// [`WordleError::Interaction`](crate::WordleError::Interaction) to report
/// failures.
pub trait GameInterface {
    /// Plays `word` as attempt number `attempt` (1-based) and returns the
    /// per-tile feedback.
    fn guess(&mut self, word: &str, attempt: usize) -> Result<Vec<FeedbackEntry>>;
}

/// A [`GameInterface`] that grades guesses against a known answer.
///
/// Useful for tests, offline replays, and benchmarking guess policies
/// without a live game.
#[derive(Debug, Clone)]
pub struct ScriptedGame {
    answer: String,
}

impl ScriptedGame {
    pub fn new(answer: impl Into<String>) -> Self {
        ScriptedGame {
            answer: answer.into().to_lowercase(),
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl GameInterface for ScriptedGame {
    fn guess(&mut self, word: &str, _attempt: usize) -> Result<Vec<FeedbackEntry>> {
        Ok(grade(&self.answer, &word.to_lowercase()))
    }
}

/// Settings for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The word to play first, before any feedback exists to filter on.
    pub opening_guess: String,
    /// The total number of guesses the game allows.
    pub max_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            opening_guess: DEFAULT_OPENING_GUESS.to_string(),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// A guess came back all-correct.
    Solved { word: String, attempts: usize },

    /// Every allowed attempt was used without solving.
    OutOfAttempts,

    /// No corpus word is consistent with the feedback received; the game
    /// cannot continue. Terminal by design, never retried.
    NoCandidates { attempts: usize },
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

/// One game's worth of state: the cumulative feedback log.
///
/// The session owns no candidate set. Candidates are recomputed from the
/// full log each turn, so the log is the single source of truth and there
/// is no incremental state to go stale. See
/// [`Filter::filter_words()`](crate::Filter::filter_words).
///
/// [`run()`](Session::run) drives a whole game; callers that need finer
/// control can instead [`record()`](Session::record) feedback themselves
/// and ask for [`candidates()`](Session::candidates) between turns.
pub struct Session<'a> {
    filter: Filter<'a>,
    config: SessionConfig,
    feedback: Vec<FeedbackEntry>,
}

impl<'a> Session<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_config(corpus, SessionConfig::default())
    }

    pub fn with_config(corpus: &'a Corpus, config: SessionConfig) -> Self {
        Session {
            filter: Filter::new(corpus),
            config,
            feedback: Vec::new(),
        }
    }

    /// The cumulative feedback log from every guess played so far.
    pub fn feedback(&self) -> &[FeedbackEntry] {
        &self.feedback
    }

    /// Appends feedback from a played guess to the log.
    pub fn record(&mut self, entries: impl IntoIterator<Item = FeedbackEntry>) {
        self.feedback.extend(entries);
    }

    /// Recomputes the candidate set from the full log.
    pub fn candidates(&self) -> BTreeSet<String> {
        self.filter.filter_words(&self.feedback)
    }

    /// Plays a whole game against `game`.
    ///
    /// The opening guess goes first; each later attempt filters the corpus
    /// by the cumulative log and plays the highest-frequency candidate.
    /// Stops as soon as a guess grades all-correct, the candidate set runs
    /// empty, or the attempts run out.
    pub fn run<G: GameInterface>(&mut self, game: &mut G) -> Result<Outcome> {
        let opening = self.config.opening_guess.clone();
        debug!("attempt 1: opening with \"{}\"", opening);
        if self.play(game, &opening, 1)? {
            info!("solved on the opening guess");
            return Ok(Outcome::Solved {
                word: opening,
                attempts: 1,
            });
        }

        for attempt in 2..=self.config.max_attempts {
            let candidates = self.candidates();
            let word = match self.filter.best_guess(&candidates) {
                Some(word) => word.to_owned(),
                None => {
                    info!("no candidates remain after attempt {}", attempt - 1);
                    return Ok(Outcome::NoCandidates {
                        attempts: attempt - 1,
                    });
                }
            };
            debug!(
                "attempt {}: {} candidates, guessing \"{}\"",
                attempt,
                candidates.len(),
                word
            );

            if self.play(game, &word, attempt)? {
                info!("solved \"{}\" in {} attempts", word, attempt);
                return Ok(Outcome::Solved {
                    word,
                    attempts: attempt,
                });
            }
        }

        info!("out of attempts");
        Ok(Outcome::OutOfAttempts)
    }

    fn play<G: GameInterface>(&mut self, game: &mut G, word: &str, attempt: usize) -> Result<bool> {
        let entries = game.guess(word, attempt)?;
        let solved = !entries.is_empty()
            && entries.iter().all(|entry| entry.status == Status::Correct);
        self.record(entries);
        Ok(solved)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::WordleError;

    fn corpus() -> Corpus {
        Corpus::from_entries([
            ("slant", 90.0),
            ("crane", 80.0),
            ("slate", 75.0),
            ("trace", 30.0),
            ("adieu", 20.0),
        ])
    }

    #[test]
    fn solves_on_opening_guess() {
        let corpus = corpus();
        let mut game = ScriptedGame::new("SLANT");
        let outcome = Session::new(&corpus).run(&mut game).unwrap();
        assert_eq!(
            outcome,
            Outcome::Solved {
                word: "slant".to_string(),
                attempts: 1
            }
        );
    }

    #[test]
    fn narrows_to_the_answer() {
        let corpus = corpus();
        let mut game = ScriptedGame::new("slate");
        let outcome = Session::new(&corpus).run(&mut game).unwrap();
        // After "slant": s/l/a correct, n absent, t present. Only "slate"
        // fits.
        assert_eq!(
            outcome,
            Outcome::Solved {
                word: "slate".to_string(),
                attempts: 2
            }
        );
    }

    #[test]
    fn reports_no_candidates_when_answer_is_missing() {
        // The opening feedback rules out both corpus words at once: every
        // letter of "slant" is absent from "buzzy", and "crane" shares its
        // 'a' and 'n'.
        let corpus = Corpus::from_entries([("slant", 90.0), ("crane", 80.0)]);
        let mut game = ScriptedGame::new("buzzy");
        let outcome = Session::new(&corpus).run(&mut game).unwrap();
        assert_eq!(outcome, Outcome::NoCandidates { attempts: 1 });
    }

    #[test]
    fn runs_out_of_attempts() {
        // Every word shares four letters with the answer's pattern, so the
        // set never empties, but the answer itself is absent.
        let corpus = Corpus::from_entries([
            ("bills", 50.0),
            ("fills", 40.0),
            ("gills", 30.0),
            ("hills", 20.0),
            ("kills", 15.0),
            ("mills", 10.0),
            ("pills", 5.0),
        ]);
        let config = SessionConfig {
            opening_guess: "bills".to_string(),
            max_attempts: 4,
        };
        let mut game = ScriptedGame::new("tills");
        let outcome = Session::with_config(&corpus, config)
            .run(&mut game)
            .unwrap();
        assert_eq!(outcome, Outcome::OutOfAttempts);
    }

    #[test]
    fn interaction_errors_propagate() {
        struct Broken;
        impl GameInterface for Broken {
            fn guess(&mut self, _word: &str, _attempt: usize) -> Result<Vec<FeedbackEntry>> {
                Err(WordleError::Interaction("tile row never settled".to_string()))
            }
        }

        let corpus = corpus();
        let err = Session::new(&corpus).run(&mut Broken).unwrap_err();
        assert!(matches!(err, WordleError::Interaction(_)));
    }

    #[test]
    fn stepwise_api_mirrors_run() {
        let corpus = corpus();
        let mut session = Session::new(&corpus);
        assert_eq!(session.candidates().len(), corpus.len());

        session.record(grade("slate", "slant"));
        let candidates = session.candidates();
        assert_eq!(
            candidates.iter().map(String::as_str).collect::<Vec<_>>(),
            ["slate"],
        );
        assert_eq!(session.feedback().len(), 5);
    }
}
