use rand::seq::SliceRandom;
use rand::Rng;

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

const WORDS: &[&str] = &[
    "APPLE", "BREAD", "CLOUD", "FLAME", "HOUSE", "LIGHT", "NIGHT", "PLANT", "WORLD",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterFeedback {
    /// Right letter in the right place
    Correct,
    /// Letter occurs somewhere else in the word
    Present,
    Absent,
}

impl LetterFeedback {
    pub fn emoji(self) -> &'static str {
        match self {
            LetterFeedback::Correct => "🟩",
            LetterFeedback::Present => "🟨",
            LetterFeedback::Absent => "⬜",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordleStatus {
    Guessing { attempts_left: usize },
    Won { attempts: usize },
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordleGuess {
    pub guess: String,
    pub feedback: [LetterFeedback; WORD_LENGTH],
    pub status: WordleStatus,
}

impl WordleGuess {
    pub fn render_feedback(&self) -> String {
        self.feedback.iter().map(|f| f.emoji()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Wordle {
    target: String,
    guesses: Vec<String>,
    max_attempts: usize,
}

impl Wordle {
    /// Start a game for a known word. The word is uppercased.
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_ascii_uppercase(),
            guesses: Vec::new(),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let word = WORDS.choose(rng).copied().unwrap_or(WORDS[0]);
        Self::new(word)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn attempts_left(&self) -> usize {
        self.max_attempts.saturating_sub(self.guesses.len())
    }

    /// Accept a guess. Input that is not exactly five ASCII letters is
    /// ignored and does not use up an attempt.
    pub fn guess(&mut self, input: &str) -> Option<WordleGuess> {
        let guess = normalize_guess(input)?;
        if self.attempts_left() == 0 {
            return None;
        }

        let feedback = score(&self.target, &guess);
        self.guesses.push(guess.clone());

        let status = if guess == self.target {
            WordleStatus::Won {
                attempts: self.guesses.len(),
            }
        } else if self.attempts_left() == 0 {
            WordleStatus::Lost
        } else {
            WordleStatus::Guessing {
                attempts_left: self.attempts_left(),
            }
        };

        Some(WordleGuess {
            guess,
            feedback,
            status,
        })
    }
}

pub fn normalize_guess(input: &str) -> Option<String> {
    let input = input.trim();
    if input.len() == WORD_LENGTH && input.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(input.to_ascii_uppercase())
    } else {
        None
    }
}

/// Per-letter feedback. A misplaced letter is marked present whenever the
/// target contains it, however many times it was already matched.
fn score(target: &str, guess: &str) -> [LetterFeedback; WORD_LENGTH] {
    let target: Vec<char> = target.chars().collect();
    let mut feedback = [LetterFeedback::Absent; WORD_LENGTH];

    for (i, c) in guess.chars().enumerate().take(WORD_LENGTH) {
        feedback[i] = if target.get(i) == Some(&c) {
            LetterFeedback::Correct
        } else if target.contains(&c) {
            LetterFeedback::Present
        } else {
            LetterFeedback::Absent
        };
    }

    feedback
}
