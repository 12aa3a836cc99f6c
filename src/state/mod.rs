pub mod candy_ledger;
pub mod guild_config;
pub mod sessions;

pub use candy_ledger::{
    create_shared_candy_ledger, CandyLedger, Leaderboard, RankedEntry, SharedCandyLedger,
};
pub use guild_config::{
    create_shared_guild_config_store, parse_role_list, parse_word_list, GuildConfig,
    GuildConfigStore, SharedGuildConfigStore,
};
pub use sessions::{create_shared_session_store, Lifecycle, SessionStore, SharedSessionStore};
