//! Practice quiz state.
//!
//! Picks challenges and tracks guesses. Everything here is free of I/O; the
//! `quiz` command drives it from stdin and presents the Morse code.

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Guesses allowed per trial.
pub const MAX_ATTEMPTS: u32 = 3;

/// What the quiz draws challenges from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSet {
    /// Single letters (either case) and digits.
    Alphanum,
    /// Words from the dictionary's practice list.
    Word,
}

/// Creates the quiz RNG, seeded when reproducible runs are wanted.
pub fn create_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    }
}

/// Draws a challenge.
///
/// Alphanumeric draws pick a number in 100..=999: below 499 gives a random
/// ASCII letter, otherwise a random digit. Returns `None` for a word draw
/// from an empty list.
pub fn pick_challenge<R: Rng + ?Sized>(
    set: QuizSet,
    words: &[String],
    rng: &mut R,
) -> Option<String> {
    match set {
        QuizSet::Alphanum => {
            let roll = rng.gen_range(100..=999);
            let challenge = if roll < 499 {
                let letter = if rng.gen_bool(0.5) {
                    rng.gen_range(b'a'..=b'z')
                } else {
                    rng.gen_range(b'A'..=b'Z')
                };
                (letter as char).to_string()
            } else {
                rng.gen_range(0..=9).to_string()
            };
            Some(challenge)
        }
        QuizSet::Word => words.choose(rng).cloned(),
    }
}

/// Result of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched.
    Correct,
    /// Wrong, with attempts left.
    Wrong {
        /// Guesses remaining.
        remaining: u32,
    },
    /// Wrong, and no attempts remain.
    Exhausted,
}

/// One challenge and its guesses.
#[derive(Debug, Clone)]
pub struct Trial {
    challenge: String,
    attempts: u32,
    solved: bool,
}

impl Trial {
    /// Starts a trial for `challenge`.
    pub fn new(challenge: impl Into<String>) -> Self {
        Self {
            challenge: challenge.into(),
            attempts: 0,
            solved: false,
        }
    }

    /// The challenge as drawn.
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// The expected answer. Morse has no case, so this is lowercase.
    pub fn answer(&self) -> String {
        self.challenge.to_lowercase()
    }

    /// Guesses made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns true once a guess has matched.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns true when no more guesses are accepted.
    pub fn is_over(&self) -> bool {
        self.solved || self.attempts >= MAX_ATTEMPTS
    }

    /// Records a guess. Case and surrounding whitespace are ignored.
    pub fn guess(&mut self, guess: &str) -> GuessOutcome {
        if self.is_over() {
            return if self.solved {
                GuessOutcome::Correct
            } else {
                GuessOutcome::Exhausted
            };
        }

        self.attempts += 1;
        if guess.trim().to_lowercase() == self.answer() {
            self.solved = true;
            GuessOutcome::Correct
        } else if self.attempts >= MAX_ATTEMPTS {
            GuessOutcome::Exhausted
        } else {
            GuessOutcome::Wrong {
                remaining: MAX_ATTEMPTS - self.attempts,
            }
        }
    }
}

/// Running totals for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    /// Trials started.
    pub trials: u32,
    /// Trials solved.
    pub correct: u32,
}

impl Scoreboard {
    /// Records a finished trial.
    pub fn record(&mut self, trial: &Trial) {
        self.trials += 1;
        if trial.is_solved() {
            self.correct += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanum_challenges_are_single_alphanumerics() {
        let mut rng = create_rng(Some(7));
        for _ in 0..500 {
            let c = pick_challenge(QuizSet::Alphanum, &[], &mut rng).unwrap();
            assert_eq!(c.chars().count(), 1);
            assert!(c.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_alphanum_draws_letters_and_digits() {
        let mut rng = create_rng(Some(11));
        let draws: Vec<String> = (0..200)
            .map(|_| pick_challenge(QuizSet::Alphanum, &[], &mut rng).unwrap())
            .collect();
        assert!(draws.iter().any(|d| d.chars().all(|c| c.is_ascii_digit())));
        assert!(draws.iter().any(|d| d.chars().all(|c| c.is_ascii_alphabetic())));
    }

    #[test]
    fn test_word_challenge_comes_from_list() {
        let words = vec!["alpha".to_string(), "bravo".to_string()];
        let mut rng = create_rng(Some(3));
        for _ in 0..20 {
            let w = pick_challenge(QuizSet::Word, &words, &mut rng).unwrap();
            assert!(words.contains(&w));
        }
        assert!(pick_challenge(QuizSet::Word, &[], &mut rng).is_none());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
        let mut a = create_rng(Some(42));
        let mut b = create_rng(Some(42));
        for _ in 0..10 {
            assert_eq!(
                pick_challenge(QuizSet::Word, &words, &mut a),
                pick_challenge(QuizSet::Word, &words, &mut b)
            );
        }
    }

    #[test]
    fn test_correct_first_guess() {
        let mut trial = Trial::new("Q");
        assert_eq!(trial.guess(" q \n"), GuessOutcome::Correct);
        assert!(trial.is_solved());
        assert!(trial.is_over());
        assert_eq!(trial.attempts(), 1);
    }

    #[test]
    fn test_three_wrong_guesses_exhaust() {
        let mut trial = Trial::new("the");
        assert_eq!(trial.guess("a"), GuessOutcome::Wrong { remaining: 2 });
        assert_eq!(trial.guess("b"), GuessOutcome::Wrong { remaining: 1 });
        assert_eq!(trial.guess("c"), GuessOutcome::Exhausted);
        assert!(trial.is_over());
        assert!(!trial.is_solved());
        // Further guesses are ignored
        assert_eq!(trial.guess("the"), GuessOutcome::Exhausted);
        assert_eq!(trial.attempts(), 3);
    }

    #[test]
    fn test_correct_on_last_attempt() {
        let mut trial = Trial::new("7");
        trial.guess("1");
        trial.guess("2");
        assert_eq!(trial.guess("7"), GuessOutcome::Correct);
    }

    #[test]
    fn test_scoreboard() {
        let mut board = Scoreboard::default();
        let mut won = Trial::new("a");
        won.guess("a");
        let lost = Trial::new("b");
        board.record(&won);
        board.record(&lost);
        assert_eq!(board, Scoreboard { trials: 2, correct: 1 });
    }
}
