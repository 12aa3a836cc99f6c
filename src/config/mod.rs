pub mod settings;

pub use settings::{BotSettings, CANDIES_FILE, CONFIGS_FILE};
