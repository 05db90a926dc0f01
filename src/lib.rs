#![doc = include_str!("../README.md")]

use thiserror::Error;

pub mod corpus;
pub use corpus::Corpus;

pub mod feedback;
pub use feedback::{grade, FeedbackEntry, Status};

pub mod filter;
pub use filter::Filter;

pub mod session;
pub use session::{GameInterface, Outcome, ScriptedGame, Session, SessionConfig};

/// The length of every playable word.
///
/// Corpus rows with words of any other length are dropped at load time.
pub const WORD_LENGTH: usize = 5;

/// How many guesses a game allows by default.
pub const MAX_ATTEMPTS: usize = 6;

/// A convenient result type using [`WordleError`].
pub type Result<T> = std::result::Result<T, WordleError>;

/// The errors that `wordle_filter` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("failed to load word corpus")]
    Corpus {
        #[from]
        kind: CorpusError,
    },

    /// The game-interaction layer failed to play a guess or read feedback.
    ///
    /// This crate never constructs this variant itself; it exists so that
    /// [`GameInterface`] implementations have an error to return.
    #[error("game interaction failed: {0}")]
    Interaction(String),
}

/// The ways loading a corpus can fail.
///
/// The corpus is a static prerequisite, so all of these are fatal to the
/// run; there is nothing to retry.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read corpus source")]
    Io(#[from] std::io::Error),

    /// The source had no header row at all.
    #[error("corpus source has no header row")]
    MissingHeader,

    /// The header row does not name a required column.
    #[error("corpus header is missing the \"{0}\" column")]
    MissingColumn(&'static str),

    /// A row is too short to contain both required columns.
    #[error("corpus row on line {line} does not have enough columns")]
    MissingField { line: usize },

    /// A frequency cell did not parse as a number.
    #[error("invalid frequency value on line {line}")]
    Frequency {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },
}
