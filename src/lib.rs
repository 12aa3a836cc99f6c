//! Minigame hub with forbidden-word moderation, and a candy counter bot.

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod games;
pub mod hooks;
pub mod interaction_id;
pub mod logging;
pub mod managers;
pub mod messages;
pub mod moderation;
pub mod state;

use std::sync::Arc;

use config::BotSettings;
use managers::{GameManager, TicketManager};
use state::{SharedCandyLedger, SharedGuildConfigStore};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CandyContext<'a> = poise::Context<'a, CandyBotData, Error>;

/// Shared state of the minigame hub
pub struct Data {
    pub settings: BotSettings,
    pub game_manager: GameManager,
    pub guild_configs: SharedGuildConfigStore,
    pub ticket_manager: Arc<TicketManager>,
}

/// Shared state of the candy bot
pub struct CandyBotData {
    pub ledger: SharedCandyLedger,
}
