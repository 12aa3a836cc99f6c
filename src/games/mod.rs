pub mod coin_flip;
pub mod elimination;
pub mod number_guess;
pub mod quiz;
pub mod tictactoe;
pub mod wordle;

pub use coin_flip::CoinFace;
pub use elimination::{Elimination, EliminationResult, JoinError, StartError};
pub use number_guess::{GuessError, Hint, NumberGuess, NumberOutcome};
pub use quiz::{Quiz, QuizOutcome};
pub use tictactoe::{Mark, MoveError, MoveOutcome, TicTacToe};
pub use wordle::{LetterFeedback, Wordle, WordleGuess, WordleStatus};

use std::fmt;
use std::str::FromStr;

/// The six minigames offered by `/setup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    TicTacToe,
    Wordle,
    Quiz,
    Elimination,
    NumberGuess,
    CoinFlip,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::TicTacToe,
        GameKind::Wordle,
        GameKind::Quiz,
        GameKind::Elimination,
        GameKind::NumberGuess,
        GameKind::CoinFlip,
    ];

    /// Value used in the game select menu
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Wordle => "wordle",
            GameKind::Quiz => "quiz",
            GameKind::Elimination => "roulette",
            GameKind::NumberGuess => "number",
            GameKind::CoinFlip => "coin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::Wordle => "Wordle",
            GameKind::Quiz => "Quiz",
            GameKind::Elimination => "Russian Roulette",
            GameKind::NumberGuess => "Random Number",
            GameKind::CoinFlip => "Flip Coin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Play three in a row",
            GameKind::Wordle => "Guess the 5-letter word",
            GameKind::Quiz => "Answer a trivia question",
            GameKind::Elimination => "Group survival game",
            GameKind::NumberGuess => "Guess the number from 1 to 500",
            GameKind::CoinFlip => "Toss a coin",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "❌",
            GameKind::Wordle => "📝",
            GameKind::Quiz => "❓",
            GameKind::Elimination => "🔫",
            GameKind::NumberGuess => "🔢",
            GameKind::CoinFlip => "🪙",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown game '{}'", s))
    }
}

/// State of one stored game session. Coin flips never get one.
#[derive(Debug, Clone)]
pub enum Game {
    TicTacToe(TicTacToe),
    Wordle(Wordle),
    Quiz(Quiz),
    Elimination(Elimination),
    NumberGuess(NumberGuess),
}

impl Game {
    pub fn kind(&self) -> GameKind {
        match self {
            Game::TicTacToe(_) => GameKind::TicTacToe,
            Game::Wordle(_) => GameKind::Wordle,
            Game::Quiz(_) => GameKind::Quiz,
            Game::Elimination(_) => GameKind::Elimination,
            Game::NumberGuess(_) => GameKind::NumberGuess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_select_values() {
        for kind in GameKind::ALL {
            assert_eq!(kind.as_str().parse::<GameKind>(), Ok(kind));
        }
        assert!("chess".parse::<GameKind>().is_err());
    }
}
