//! Typed ids carried in Discord component and modal `custom_id` strings.
//!
//! Every button, select menu and modal the bots send encodes one of these,
//! so event routing is a `parse` plus a `match` instead of prefix checks.

use poise::serenity_prelude::{ChannelId, UserId};
use std::fmt;
use std::str::FromStr;

use crate::error::BotError;
use crate::games::GameKind;

/// Who a session belongs to: a single player, or everyone in a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    User(UserId),
    Channel(ChannelId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::User(id) => write!(f, "u{}", id),
            Owner::Channel(id) => write!(f, "c{}", id),
        }
    }
}

impl FromStr for Owner {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let tag = chars.next();
        let id = parse_snowflake(chars.as_str()).ok_or_else(|| invalid_id(s))?;
        match tag {
            Some('u') => Ok(Owner::User(UserId::new(id))),
            Some('c') => Ok(Owner::Channel(ChannelId::new(id))),
            _ => Err(invalid_id(s)),
        }
    }
}

/// Key of one game session. `seq` is unique per process, so two sessions
/// created by the same owner in the same millisecond never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    pub kind: GameKind,
    pub owner: Owner,
    pub created_at_ms: i64,
    pub seq: u64,
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.kind, self.owner, self.created_at_ms, self.seq
        )
    }
}

impl FromStr for SessionId {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(kind), Some(owner), Some(created), Some(seq), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(invalid_id(s));
        };

        Ok(SessionId {
            kind: kind.parse().map_err(|_| invalid_id(s))?,
            owner: owner.parse()?,
            created_at_ms: created.parse().map_err(|_| invalid_id(s))?,
            seq: seq.parse().map_err(|_| invalid_id(s))?,
        })
    }
}

/// Buttons and select menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentId {
    SelectGame,
    ConfigBadWords,
    ConfigTicketRoles,
    ConfigBypassRole,
    TicTacToeCell { session: SessionId, cell: usize },
    QuizAnswer { session: SessionId, option: usize },
    EliminationJoin { session: SessionId },
    EliminationStart { session: SessionId },
    CloseTicket { user: UserId },
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::SelectGame => f.write_str("select_game"),
            ComponentId::ConfigBadWords => f.write_str("config_badwords"),
            ComponentId::ConfigTicketRoles => f.write_str("config_ticket_roles"),
            ComponentId::ConfigBypassRole => f.write_str("config_bypass_role"),
            ComponentId::TicTacToeCell { session, cell } => write!(f, "ttt:{}:{}", session, cell),
            ComponentId::QuizAnswer { session, option } => write!(f, "quiz:{}:{}", session, option),
            ComponentId::EliminationJoin { session } => write!(f, "roulette_join:{}", session),
            ComponentId::EliminationStart { session } => write!(f, "roulette_start:{}", session),
            ComponentId::CloseTicket { user } => write!(f, "close_ticket:{}", user),
        }
    }
}

impl FromStr for ComponentId {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select_game" => return Ok(ComponentId::SelectGame),
            "config_badwords" => return Ok(ComponentId::ConfigBadWords),
            "config_ticket_roles" => return Ok(ComponentId::ConfigTicketRoles),
            "config_bypass_role" => return Ok(ComponentId::ConfigBypassRole),
            _ => {}
        }

        let parts: Vec<&str> = s.split(':').collect();
        let id = match parts.as_slice() {
            ["ttt", session, cell] => ComponentId::TicTacToeCell {
                session: session.parse()?,
                cell: cell.parse().map_err(|_| invalid_id(s))?,
            },
            ["quiz", session, option] => ComponentId::QuizAnswer {
                session: session.parse()?,
                option: option.parse().map_err(|_| invalid_id(s))?,
            },
            ["roulette_join", session] => ComponentId::EliminationJoin {
                session: session.parse()?,
            },
            ["roulette_start", session] => ComponentId::EliminationStart {
                session: session.parse()?,
            },
            ["close_ticket", user] => ComponentId::CloseTicket {
                user: UserId::new(parse_snowflake(user).ok_or_else(|| invalid_id(s))?),
            },
            _ => return Err(invalid_id(s)),
        };
        Ok(id)
    }
}

/// Configuration modals opened from `/config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    BadWords,
    TicketRoles,
    BypassRole,
}

impl ModalId {
    /// Custom id of the single text input inside the modal
    pub fn input_id(&self) -> &'static str {
        match self {
            ModalId::BadWords => "badwords_input",
            ModalId::TicketRoles => "ticket_roles_input",
            ModalId::BypassRole => "bypass_role_input",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModalId::BadWords => "modal_badwords",
            ModalId::TicketRoles => "modal_ticket_roles",
            ModalId::BypassRole => "modal_bypass_role",
        })
    }
}

impl FromStr for ModalId {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modal_badwords" => Ok(ModalId::BadWords),
            "modal_ticket_roles" => Ok(ModalId::TicketRoles),
            "modal_bypass_role" => Ok(ModalId::BypassRole),
            _ => Err(invalid_id(s)),
        }
    }
}

/// Discord ids are non-zero; `UserId::new(0)` panics
fn parse_snowflake(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

fn invalid_id(s: &str) -> BotError {
    BotError::InvalidComponentId { id: s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(kind: GameKind) -> SessionId {
        SessionId {
            kind,
            owner: Owner::User(UserId::new(123456789012345678)),
            created_at_ms: 1_730_000_000_000,
            seq: 7,
        }
    }

    #[test]
    fn test_component_ids_survive_encoding() {
        let ids = [
            ComponentId::SelectGame,
            ComponentId::ConfigBadWords,
            ComponentId::ConfigTicketRoles,
            ComponentId::ConfigBypassRole,
            ComponentId::TicTacToeCell {
                session: session(GameKind::TicTacToe),
                cell: 8,
            },
            ComponentId::QuizAnswer {
                session: session(GameKind::Quiz),
                option: 3,
            },
            ComponentId::EliminationJoin {
                session: SessionId {
                    owner: Owner::Channel(ChannelId::new(42)),
                    ..session(GameKind::Elimination)
                },
            },
            ComponentId::CloseTicket {
                user: UserId::new(99),
            },
        ];

        for id in ids {
            let encoded = id.to_string();
            assert!(encoded.len() <= 100, "{} is too long for Discord", encoded);
            assert_eq!(encoded.parse::<ComponentId>().unwrap(), id);
        }
    }

    #[test]
    fn test_session_id_format() {
        let id = session(GameKind::Wordle);
        assert_eq!(id.to_string(), "wordle.u123456789012345678.1730000000000.7");
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        for raw in [
            "",
            "ttt",
            "ttt:wordle.u1.2.3",
            "ttt:wordle.u1.2.3:x",
            "ttt:chess.u1.2.3:1",
            "ttt:wordle.x1.2.3:1",
            "ttt:wordle.u0.2.3:1",
            "ttt:wordle.u1.2.3.4:1",
            "close_ticket:abc",
            "close_ticket:0",
            "something_else",
        ] {
            assert!(raw.parse::<ComponentId>().is_err(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn test_modal_ids() {
        for modal in [ModalId::BadWords, ModalId::TicketRoles, ModalId::BypassRole] {
            assert_eq!(modal.to_string().parse::<ModalId>().unwrap(), modal);
        }
        assert!("modal_other".parse::<ModalId>().is_err());
    }
}
