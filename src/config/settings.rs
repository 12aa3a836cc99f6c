use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIGS_FILE: &str = "configs.json";
pub const CANDIES_FILE: &str = "candies.json";

const DEFAULT_APPEAL_ROLE: &str = "Under appeal";
const DEFAULT_TICKET_CLOSE_DELAY: Duration = Duration::from_secs(5);

/// Runtime settings resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Directory holding the JSON state files
    pub data_dir: PathBuf,

    /// Role given to members while their ticket is open
    pub appeal_role_name: String,

    /// Delay between closing a ticket and deleting its channel
    pub ticket_close_delay: Duration,
}

impl BotSettings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            appeal_role_name: DEFAULT_APPEAL_ROLE.to_string(),
            ticket_close_delay: DEFAULT_TICKET_CLOSE_DELAY,
        }
    }

    /// Resolve the data directory: explicit flag, then `DATA_PATH`, then `data`
    pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| std::env::var("DATA_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn configs_path(&self) -> PathBuf {
        self.data_dir.join(CONFIGS_FILE)
    }

    pub fn candies_path(&self) -> PathBuf {
        self.data_dir.join(CANDIES_FILE)
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::new("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let settings = BotSettings::new("/tmp/bot");
        assert_eq!(settings.configs_path(), PathBuf::from("/tmp/bot/configs.json"));
        assert_eq!(settings.candies_path(), PathBuf::from("/tmp/bot/candies.json"));
        assert_eq!(settings.ticket_close_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_flag_wins_over_environment() {
        let dir = BotSettings::resolve_data_dir(Some(Path::new("custom")));
        assert_eq!(dir, PathBuf::from("custom"));
    }
}
