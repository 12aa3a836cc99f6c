use rand::Rng;
use std::ops::RangeInclusive;

pub const RANGE: RangeInclusive<u32> = 1..=500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOutcome {
    Wrong { hint: Hint, attempts: u32 },
    Solved { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    NotANumber,
    OutOfRange(i64),
}

#[derive(Debug, Clone)]
pub struct NumberGuess {
    target: u32,
    attempts: u32,
}

impl NumberGuess {
    pub fn new(target: u32) -> Self {
        Self {
            target: target.clamp(*RANGE.start(), *RANGE.end()),
            attempts: 0,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(RANGE))
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Score a guess. Only in-range guesses count as attempts.
    pub fn guess(&mut self, value: i64) -> Result<NumberOutcome, GuessError> {
        if value < i64::from(*RANGE.start()) || value > i64::from(*RANGE.end()) {
            return Err(GuessError::OutOfRange(value));
        }
        self.attempts += 1;

        let value = value as u32;
        Ok(if value == self.target {
            NumberOutcome::Solved {
                attempts: self.attempts,
            }
        } else {
            NumberOutcome::Wrong {
                hint: if value < self.target {
                    Hint::Higher
                } else {
                    Hint::Lower
                },
                attempts: self.attempts,
            }
        })
    }

    /// Parse chat text and score it
    pub fn guess_text(&mut self, text: &str) -> Result<NumberOutcome, GuessError> {
        let value = text
            .trim()
            .parse::<i64>()
            .map_err(|_| GuessError::NotANumber)?;
        self.guess(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hints() {
        let mut game = NumberGuess::new(250);
        assert_eq!(
            game.guess(100),
            Ok(NumberOutcome::Wrong {
                hint: Hint::Higher,
                attempts: 1
            })
        );
        assert_eq!(
            game.guess(400),
            Ok(NumberOutcome::Wrong {
                hint: Hint::Lower,
                attempts: 2
            })
        );
        assert_eq!(game.guess(250), Ok(NumberOutcome::Solved { attempts: 3 }));
    }

    #[test]
    fn test_invalid_guesses_do_not_count() {
        let mut game = NumberGuess::new(250);
        assert_eq!(game.guess(0), Err(GuessError::OutOfRange(0)));
        assert_eq!(game.guess(501), Err(GuessError::OutOfRange(501)));
        assert_eq!(game.guess_text("hello"), Err(GuessError::NotANumber));
        assert_eq!(game.attempts(), 0);

        assert_eq!(game.guess_text(" 250\n"), Ok(NumberOutcome::Solved { attempts: 1 }));
    }

    #[test]
    fn test_binary_search_finds_target() {
        let mut game = NumberGuess::new(337);
        let (mut low, mut high) = (*RANGE.start(), *RANGE.end());
        loop {
            let mid = (low + high) / 2;
            match game.guess(i64::from(mid)).unwrap() {
                NumberOutcome::Solved { attempts } => {
                    assert!(attempts <= 9);
                    break;
                }
                NumberOutcome::Wrong { hint: Hint::Higher, .. } => low = mid + 1,
                NumberOutcome::Wrong { hint: Hint::Lower, .. } => high = mid - 1,
            }
        }
    }

    #[test]
    fn test_random_target_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(RANGE.contains(&NumberGuess::random(&mut rng).target()));
        }
    }
}
