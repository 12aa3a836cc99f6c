use poise::serenity_prelude::{ChannelId, UserId};
use rand::Rng;
use tracing::{debug, info};

use crate::games::{
    CoinFace, Elimination, EliminationResult, Game, GameKind, JoinError, MoveError, MoveOutcome,
    NumberGuess, NumberOutcome, Quiz, QuizOutcome, StartError, TicTacToe, Wordle, WordleGuess,
    WordleStatus,
};
use crate::interaction_id::{Owner, SessionId};
use crate::state::{Lifecycle, SharedSessionStore};

/// What a game selection produced
#[derive(Debug, Clone)]
pub enum GameStart {
    TicTacToe { session: SessionId, game: TicTacToe },
    Wordle { session: SessionId, max_attempts: usize },
    Quiz { session: SessionId, quiz: Quiz },
    Elimination { session: SessionId },
    NumberGuess { session: SessionId },
    CoinFlip(CoinFace),
}

/// Reply to a board click
#[derive(Debug, Clone)]
pub enum BoardReply {
    Moved { game: TicTacToe, outcome: MoveOutcome },
    Rejected(MoveError),
    Missing,
}

#[derive(Debug, Clone)]
pub enum JoinReply {
    Joined { players: Vec<UserId> },
    Rejected(JoinError),
    Missing,
}

#[derive(Debug, Clone)]
pub enum StartReply {
    Resolved(EliminationResult),
    Rejected(StartError),
    Missing,
}

/// Reply to a chat message that fed one of the author's games
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextReply {
    Wordle { guess: WordleGuess, target: String },
    Number { outcome: NumberOutcome, target: u32 },
}

/// Routes game events to the right session and engine
pub struct GameManager {
    sessions: SharedSessionStore,
}

impl GameManager {
    pub fn new(sessions: SharedSessionStore) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SharedSessionStore {
        &self.sessions
    }

    pub fn start(&self, kind: GameKind, user: UserId, channel: ChannelId) -> GameStart {
        self.start_with_rng(kind, user, channel, &mut rand::thread_rng())
    }

    /// Open a session for `kind`. Elimination lobbies belong to the channel,
    /// everything else to the user who picked the game.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        kind: GameKind,
        user: UserId,
        channel: ChannelId,
        rng: &mut R,
    ) -> GameStart {
        let owner = Owner::User(user);
        let start = match kind {
            GameKind::TicTacToe => {
                let game = TicTacToe::new(user);
                let session = self.sessions.create(owner, Game::TicTacToe(game.clone()));
                GameStart::TicTacToe { session, game }
            }
            GameKind::Wordle => {
                let game = Wordle::random(rng);
                let max_attempts = game.max_attempts();
                let session = self.sessions.create(owner, Game::Wordle(game));
                GameStart::Wordle {
                    session,
                    max_attempts,
                }
            }
            GameKind::Quiz => {
                let quiz = Quiz::random(rng);
                let session = self.sessions.create(owner, Game::Quiz(quiz.clone()));
                GameStart::Quiz { session, quiz }
            }
            GameKind::Elimination => {
                let session = self.sessions.create(
                    Owner::Channel(channel),
                    Game::Elimination(Elimination::random(rng)),
                );
                GameStart::Elimination { session }
            }
            GameKind::NumberGuess => {
                let session = self
                    .sessions
                    .create(owner, Game::NumberGuess(NumberGuess::random(rng)));
                GameStart::NumberGuess { session }
            }
            GameKind::CoinFlip => GameStart::CoinFlip(CoinFace::flip(rng)),
        };

        info!("User {} started {} in channel {}", user, kind, channel);
        start
    }

    pub fn play_tictactoe(&self, session: &SessionId, cell: usize, user: UserId) -> BoardReply {
        self.sessions
            .advance(session, |game| match game {
                Game::TicTacToe(board) => match board.play(cell, user) {
                    Ok(outcome) => {
                        let lifecycle = match outcome {
                            MoveOutcome::Continue { .. } => Lifecycle::Keep,
                            MoveOutcome::Won(_) | MoveOutcome::Draw => Lifecycle::End,
                        };
                        (
                            BoardReply::Moved {
                                game: board.clone(),
                                outcome,
                            },
                            lifecycle,
                        )
                    }
                    Err(e) => (BoardReply::Rejected(e), Lifecycle::Keep),
                },
                _ => (BoardReply::Missing, Lifecycle::Keep),
            })
            .unwrap_or(BoardReply::Missing)
    }

    /// Answer a quiz. The session ends whatever the answer.
    pub fn answer_quiz(&self, session: &SessionId, option: usize) -> Option<QuizOutcome> {
        self.sessions
            .advance(session, |game| match game {
                Game::Quiz(quiz) => (Some(quiz.answer(option)), Lifecycle::End),
                _ => (None, Lifecycle::Keep),
            })
            .flatten()
    }

    pub fn join_elimination(&self, session: &SessionId, user: UserId) -> JoinReply {
        self.sessions
            .update(session, |game| match game {
                Game::Elimination(lobby) => match lobby.join(user) {
                    Ok(_) => JoinReply::Joined {
                        players: lobby.players().to_vec(),
                    },
                    Err(e) => JoinReply::Rejected(e),
                },
                _ => JoinReply::Missing,
            })
            .unwrap_or(JoinReply::Missing)
    }

    pub fn start_elimination(&self, session: &SessionId) -> StartReply {
        self.sessions
            .advance(session, |game| match game {
                Game::Elimination(lobby) => match lobby.start() {
                    Ok(result) => (StartReply::Resolved(result), Lifecycle::End),
                    Err(e) => (StartReply::Rejected(e), Lifecycle::Keep),
                },
                _ => (StartReply::Missing, Lifecycle::Keep),
            })
            .unwrap_or(StartReply::Missing)
    }

    /// Feed a chat message to the author's oldest Wordle and NumberGuess
    /// sessions. Messages that are not valid guesses produce no reply.
    pub fn handle_text(&self, author: UserId, content: &str) -> Vec<TextReply> {
        let owner = Owner::User(author);
        let mut replies = Vec::new();

        if content.chars().count() == crate::games::wordle::WORD_LENGTH {
            if let Some(session) = self.sessions.find_oldest(GameKind::Wordle, owner) {
                let reply = self
                    .sessions
                    .advance(&session, |game| match game {
                        Game::Wordle(wordle) => match wordle.guess(content) {
                            Some(guess) => {
                                let lifecycle = match guess.status {
                                    WordleStatus::Guessing { .. } => Lifecycle::Keep,
                                    WordleStatus::Won { .. } | WordleStatus::Lost => Lifecycle::End,
                                };
                                let target = wordle.target().to_string();
                                (Some(TextReply::Wordle { guess, target }), lifecycle)
                            }
                            None => (None, Lifecycle::Keep),
                        },
                        _ => (None, Lifecycle::Keep),
                    })
                    .flatten();
                replies.extend(reply);
            }
        }

        if let Some(session) = self.sessions.find_oldest(GameKind::NumberGuess, owner) {
            let reply = self
                .sessions
                .advance(&session, |game| match game {
                    Game::NumberGuess(number) => match number.guess_text(content) {
                        Ok(outcome) => {
                            let lifecycle = match outcome {
                                NumberOutcome::Solved { .. } => Lifecycle::End,
                                NumberOutcome::Wrong { .. } => Lifecycle::Keep,
                            };
                            let target = number.target();
                            (Some(TextReply::Number { outcome, target }), lifecycle)
                        }
                        Err(e) => {
                            debug!("Ignoring number guess from {}: {:?}", author, e);
                            (None, Lifecycle::Keep)
                        }
                    },
                    _ => (None, Lifecycle::Keep),
                })
                .flatten();
            replies.extend(reply);
        }

        replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Hint, Mark};
    use crate::state::create_shared_session_store;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn manager() -> GameManager {
        GameManager::new(create_shared_session_store())
    }

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    fn channel() -> ChannelId {
        ChannelId::new(500)
    }

    #[test]
    fn test_coin_flip_creates_no_session() {
        let manager = manager();
        let start = manager.start(GameKind::CoinFlip, user(1), channel());
        assert!(matches!(start, GameStart::CoinFlip(_)));
        assert!(manager.sessions().is_empty());
    }

    #[test]
    fn test_elimination_is_owned_by_channel() {
        let manager = manager();
        let GameStart::Elimination { session } =
            manager.start(GameKind::Elimination, user(1), channel())
        else {
            panic!("expected an elimination lobby");
        };
        assert_eq!(session.owner, Owner::Channel(channel()));
    }

    #[test]
    fn test_tictactoe_game_runs_to_a_win() {
        let manager = manager();
        let GameStart::TicTacToe { session, .. } =
            manager.start(GameKind::TicTacToe, user(1), channel())
        else {
            panic!("expected a board");
        };

        for (cell, who) in [(0, 1), (3, 2), (1, 1), (4, 2)] {
            assert!(matches!(
                manager.play_tictactoe(&session, cell, user(who)),
                BoardReply::Moved {
                    outcome: MoveOutcome::Continue { .. },
                    ..
                }
            ));
        }

        assert!(matches!(
            manager.play_tictactoe(&session, 3, user(1)),
            BoardReply::Rejected(MoveError::Occupied(3))
        ));

        match manager.play_tictactoe(&session, 2, user(1)) {
            BoardReply::Moved { outcome, .. } => assert_eq!(outcome, MoveOutcome::Won(Mark::X)),
            other => panic!("unexpected reply {:?}", other),
        }

        // Session is gone once the game ends
        assert!(matches!(
            manager.play_tictactoe(&session, 8, user(2)),
            BoardReply::Missing
        ));
    }

    #[test]
    fn test_quiz_ends_after_one_answer() {
        let manager = manager();
        let mut rng = StdRng::seed_from_u64(5);
        let GameStart::Quiz { session, .. } =
            manager.start_with_rng(GameKind::Quiz, user(1), channel(), &mut rng)
        else {
            panic!("expected a quiz");
        };

        assert!(manager.answer_quiz(&session, 0).is_some());
        assert!(manager.answer_quiz(&session, 1).is_none());
    }

    #[test]
    fn test_component_for_wrong_game_kind_is_missing() {
        let manager = manager();
        let GameStart::Quiz { session, .. } = manager.start(GameKind::Quiz, user(1), channel())
        else {
            panic!("expected a quiz");
        };

        assert!(matches!(
            manager.play_tictactoe(&session, 0, user(1)),
            BoardReply::Missing
        ));
        assert!(matches!(
            manager.join_elimination(&session, user(1)),
            JoinReply::Missing
        ));
        // The quiz itself is untouched
        assert!(manager.answer_quiz(&session, 0).is_some());
    }

    #[test]
    fn test_elimination_flow() {
        let manager = manager();
        let GameStart::Elimination { session } =
            manager.start(GameKind::Elimination, user(1), channel())
        else {
            panic!("expected an elimination lobby");
        };

        assert!(matches!(
            manager.join_elimination(&session, user(1)),
            JoinReply::Joined { ref players } if players.len() == 1
        ));
        assert!(matches!(
            manager.join_elimination(&session, user(1)),
            JoinReply::Rejected(JoinError::AlreadyJoined)
        ));
        assert!(matches!(
            manager.start_elimination(&session),
            StartReply::Rejected(StartError::NotEnoughPlayers { joined: 1 })
        ));

        manager.join_elimination(&session, user(2));
        match manager.start_elimination(&session) {
            StartReply::Resolved(result) => assert_eq!(result.survivors.len(), 1),
            other => panic!("unexpected reply {:?}", other),
        }
        assert!(matches!(manager.start_elimination(&session), StartReply::Missing));
    }

    #[test]
    fn test_text_feeds_wordle() {
        let manager = manager();
        let session = manager
            .sessions()
            .create(Owner::User(user(1)), Game::Wordle(Wordle::new("GATOS")));

        // Wrong length and other users are ignored
        assert!(manager.handle_text(user(1), "hello there").is_empty());
        assert!(manager.handle_text(user(2), "gatos").is_empty());

        let replies = manager.handle_text(user(1), "gatas");
        assert!(matches!(
            &replies[..],
            [TextReply::Wordle { guess, .. }] if guess.status == WordleStatus::Guessing { attempts_left: 5 }
        ));

        let replies = manager.handle_text(user(1), "gatos");
        assert!(matches!(
            &replies[..],
            [TextReply::Wordle { guess, target }]
                if guess.status == WordleStatus::Won { attempts: 2 } && target == "GATOS"
        ));
        assert!(!manager.sessions().contains(&session));
    }

    #[test]
    fn test_text_feeds_number_guess() {
        let manager = manager();
        let session = manager
            .sessions()
            .create(Owner::User(user(1)), Game::NumberGuess(NumberGuess::new(250)));

        assert!(manager.handle_text(user(1), "9999").is_empty());
        assert!(manager.handle_text(user(1), "abc").is_empty());

        assert_eq!(
            manager.handle_text(user(1), "100"),
            vec![TextReply::Number {
                outcome: NumberOutcome::Wrong {
                    hint: Hint::Higher,
                    attempts: 1
                },
                target: 250
            }]
        );
        assert_eq!(
            manager.handle_text(user(1), "400"),
            vec![TextReply::Number {
                outcome: NumberOutcome::Wrong {
                    hint: Hint::Lower,
                    attempts: 2
                },
                target: 250
            }]
        );
        assert_eq!(
            manager.handle_text(user(1), "250"),
            vec![TextReply::Number {
                outcome: NumberOutcome::Solved { attempts: 3 },
                target: 250
            }]
        );
        assert!(!manager.sessions().contains(&session));
    }

    #[test]
    fn test_one_message_can_feed_both_games() {
        let manager = manager();
        manager
            .sessions()
            .create(Owner::User(user(1)), Game::Wordle(Wordle::new("APPLE")));
        manager
            .sessions()
            .create(Owner::User(user(1)), Game::NumberGuess(NumberGuess::new(5)));

        // Five digits: not a Wordle guess, but an out of range number
        assert!(manager.handle_text(user(1), "12345").is_empty());

        // "00005" is five characters but not letters; the number game takes it
        let replies = manager.handle_text(user(1), "00005");
        assert_eq!(replies.len(), 1);
        assert!(matches!(replies[0], TextReply::Number { .. }));
    }
}
