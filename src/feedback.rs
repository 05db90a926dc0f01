//! Per-tile feedback from played guesses.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The verdict the game reveals for one letter of a guess.
///
/// `Correct` means the right letter in the right position, `Present` the
/// right letter in the wrong position, and `Absent` a letter the word does
/// not contain (subject to the repeated-letter accounting described on
/// [`grade()`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Status {
    Correct,
    Present,
    Absent,
}

/// The error returned when a tile label does not name a [`Status`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized tile status \"{0}\"")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    /// Parses the tile labels the game exposes (`correct`, `present`,
    /// `absent`), ignoring surrounding whitespace and ASCII case.
    ///
    /// An interaction layer that scrapes labels can use this and decide for
    /// itself whether to drop or fail on entries that do not parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("correct") {
            Ok(Status::Correct)
        } else if label.eq_ignore_ascii_case("present") {
            Ok(Status::Present)
        } else if label.eq_ignore_ascii_case("absent") {
            Ok(Status::Absent)
        } else {
            Err(ParseStatusError(label.to_string()))
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Correct => "correct",
            Status::Present => "present",
            Status::Absent => "absent",
        };
        write!(f, "{}", label)
    }
}

/// One letter's verdict from one played guess.
///
/// A full guess produces one entry per position. The filter consumes the
/// ordered concatenation of every guess's entries; see
/// [`Filter::filter_words()`](crate::Filter::filter_words).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackEntry {
    /// Zero-based position of the letter within the guess.
    pub position: usize,
    /// The guessed letter, lowercase.
    pub letter: char,
    /// The game's verdict for this letter.
    pub status: Status,
}

impl FeedbackEntry {
    pub fn new(position: usize, letter: char, status: Status) -> Self {
        FeedbackEntry {
            position,
            letter,
            status,
        }
    }
}

impl Display for FeedbackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.letter, self.position, self.status)
    }
}

/// Grades `guess` against a known `answer`, one entry per position.
///
/// Correct tiles claim their letters first; the remaining guess letters are
/// marked `Present` only while unclaimed copies of that letter remain in
/// the answer, and `Absent` otherwise. So guessing `spool` against `sober`
/// grades the first `o` present and the second absent.
///
/// Both words must have the same length and should already be lowercase.
///
/// # Examples
///
/// ```rust
/// use wordle_filter::{grade, Status};
///
/// let feedback = grade("sober", "spool");
/// let statuses: Vec<Status> = feedback.iter().map(|entry| entry.status).collect();
/// assert_eq!(
///     statuses,
///     [
///         Status::Correct,
///         Status::Absent,
///         Status::Present,
///         Status::Absent,
///         Status::Absent,
///     ],
/// );
/// ```
pub fn grade(answer: &str, guess: &str) -> Vec<FeedbackEntry> {
    debug_assert_eq!(answer.chars().count(), guess.chars().count());

    let mut entries: Vec<FeedbackEntry> = guess
        .chars()
        .enumerate()
        .map(|(position, letter)| FeedbackEntry::new(position, letter, Status::Absent))
        .collect();
    let mut claimed = HashMap::new();

    // Grade correct letters first, since those get priority over present
    // marks for repeated letters.
    for (i, (guessed, actual)) in guess
        .chars()
        .zip(answer.chars())
        .enumerate()
        .sorted_unstable_by_key(|&(i, (guessed, actual))| (guessed != actual, i))
    {
        if guessed == actual {
            entries[i].status = Status::Correct;
            *claimed.entry(guessed).or_insert(0_usize) += 1;
        } else {
            let available = answer.chars().filter(|&c| c == guessed).count();
            let taken = claimed.entry(guessed).or_insert(0);
            if *taken < available {
                *taken += 1;
                entries[i].status = Status::Present;
            }
        }
    }

    entries
}

#[cfg(test)]
mod test {
    use super::*;

    fn statuses(answer: &str, guess: &str) -> String {
        grade(answer, guess)
            .iter()
            .map(|entry| match entry.status {
                Status::Correct => 'c',
                Status::Present => 'p',
                Status::Absent => 'a',
            })
            .collect()
    }

    #[test]
    fn parses_tile_labels() {
        assert_eq!("correct".parse(), Ok(Status::Correct));
        assert_eq!("Present".parse(), Ok(Status::Present));
        assert_eq!(" ABSENT ".parse(), Ok(Status::Absent));
        assert_eq!(
            "almost".parse::<Status>(),
            Err(ParseStatusError("almost".to_string()))
        );
    }

    #[test]
    fn status_display_round_trips() {
        for status in [Status::Correct, Status::Present, Status::Absent] {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }

    #[test]
    fn grades_exact_match() {
        assert_eq!(statuses("crane", "crane"), "ccccc");
    }

    #[test]
    fn grades_disjoint_letters() {
        assert_eq!(statuses("abcde", "fghij"), "aaaaa");
    }

    #[test]
    fn grades_full_rotation_present() {
        assert_eq!(statuses("abcde", "eabcd"), "ppppp");
    }

    // Repeated-letter cases taken from real games.
    #[test]
    fn repeated_guess_letter_single_in_answer() {
        // Only one `o` in the answer, so only the first unmatched `o` is
        // present.
        assert_eq!(statuses("sober", "spool"), "capaa");
    }

    #[test]
    fn repeated_guess_letter_with_correct_copy() {
        // The `s` in position 0 is correct; the answer has no second `s`.
        assert_eq!(statuses("sober", "soaks"), "ccaaa");
    }

    #[test]
    fn correct_copy_claims_before_present() {
        assert_eq!(statuses("azzaz", "aaabb"), "cpaaa");
    }

    #[test]
    fn present_budget_spread_over_answer_copies() {
        assert_eq!(statuses("aabbb", "ccaac"), "aappa");
    }

    #[test]
    fn later_correct_beats_earlier_present() {
        // The second `a` of the guess sits on a real `a`, so it grades
        // correct and the first `a` draws from the remaining budget.
        assert_eq!(statuses("aabbb", "caacc"), "acpaa");
    }
}
