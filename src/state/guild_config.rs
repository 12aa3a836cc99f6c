use poise::serenity_prelude::RoleId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::error::{BotError, Result};

/// Moderation settings for one guild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfig {
    /// Forbidden words, lowercased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_words: Option<Vec<String>>,

    /// Roles that can see and handle tickets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ticket_roles: Vec<String>,

    /// Members with this role are never filtered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_role: Option<String>,
}

impl GuildConfig {
    /// Ticket roles that parse as Discord ids. Anything else is skipped.
    pub fn ticket_role_ids(&self) -> Vec<RoleId> {
        self.ticket_roles
            .iter()
            .filter_map(|raw| match raw.parse::<u64>() {
                Ok(id) if id != 0 => Some(RoleId::new(id)),
                _ => {
                    warn!("Ignoring invalid ticket role id '{}'", raw);
                    None
                }
            })
            .collect()
    }

    pub fn bypass_role_id(&self) -> Option<RoleId> {
        self.bypass_role
            .as_deref()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|id| *id != 0)
            .map(RoleId::new)
    }
}

/// All guild configurations, keyed by guild id. Serialised as a plain JSON
/// object and rewritten wholesale on every change.
#[derive(Debug, Clone, Default)]
pub struct GuildConfigStore {
    path: PathBuf,
    guilds: HashMap<String, GuildConfig>,
}

impl GuildConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guilds: HashMap::new(),
        }
    }

    /// Load from file. A missing file is an empty store.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let guilds = serde_json::from_str(&content).map_err(|e| BotError::StateParse {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(Self { path, guilds })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new(path)),
            Err(e) => Err(BotError::StateLoad {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Save to file atomically
    pub async fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.guilds)?;
        write_atomic(&self.path, &content).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, guild_id: &str) -> Option<&GuildConfig> {
        self.guilds.get(guild_id)
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    fn get_or_create(&mut self, guild_id: &str) -> &mut GuildConfig {
        self.guilds.entry(guild_id.to_string()).or_default()
    }

    /// Replace the forbidden word list; returns how many were stored
    pub fn set_bad_words(&mut self, guild_id: &str, words: Vec<String>) -> usize {
        let count = words.len();
        self.get_or_create(guild_id).bad_words = Some(words);
        count
    }

    pub fn set_ticket_roles(&mut self, guild_id: &str, roles: Vec<String>) -> usize {
        let count = roles.len();
        self.get_or_create(guild_id).ticket_roles = roles;
        count
    }

    pub fn set_bypass_role(&mut self, guild_id: &str, role_id: &str) {
        self.get_or_create(guild_id).bypass_role = Some(role_id.to_string());
    }
}

/// Split comma separated modal input into trimmed, lowercased words
pub fn parse_word_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split comma separated role ids, keeping them as typed
pub fn parse_role_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

/// Write to `<path>.tmp` and rename over the target
pub(crate) async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BotError::StateSave {
                path: path.display().to_string(),
                source: e,
            })?;
    }

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");

    tokio::fs::write(&temp_path, content)
        .await
        .map_err(|e| BotError::StateSave {
            path: path.display().to_string(),
            source: e,
        })?;

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| BotError::StateSave {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(())
}

/// Shared guild config type
pub type SharedGuildConfigStore = Arc<tokio::sync::RwLock<GuildConfigStore>>;

pub fn create_shared_guild_config_store(store: GuildConfigStore) -> SharedGuildConfigStore {
    Arc::new(tokio::sync::RwLock::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_list() {
        assert_eq!(
            parse_word_list(" Foo, BAR ,, baz qux ,"),
            vec!["foo", "bar", "baz qux"]
        );
        assert!(parse_word_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_role_list() {
        assert_eq!(parse_role_list("123, 456,,"), vec!["123", "456"]);
    }

    #[test]
    fn test_file_format() {
        let json = r#"{
            "111": {
                "badWords": ["foo", "bar"],
                "ticketRoles": ["222", "oops"],
                "bypassRole": "333"
            },
            "444": {}
        }"#;

        let guilds: HashMap<String, GuildConfig> = serde_json::from_str(json).unwrap();
        let config = &guilds["111"];
        assert_eq!(config.bad_words.as_deref(), Some(&["foo".to_string(), "bar".to_string()][..]));
        assert_eq!(config.ticket_role_ids(), vec![RoleId::new(222)]);
        assert_eq!(config.bypass_role_id(), Some(RoleId::new(333)));
        assert_eq!(guilds["444"], GuildConfig::default());
    }

    #[test]
    fn test_setters_create_guild_lazily() {
        let mut store = GuildConfigStore::new("unused.json");
        assert!(store.get("1").is_none());

        assert_eq!(store.set_bad_words("1", vec!["foo".into()]), 1);
        store.set_bypass_role("1", "99");
        assert_eq!(store.set_ticket_roles("1", vec!["5".into(), "6".into()]), 2);

        let config = store.get("1").unwrap();
        assert_eq!(config.bad_words, Some(vec!["foo".to_string()]));
        assert_eq!(config.bypass_role.as_deref(), Some("99"));
        assert_eq!(config.ticket_roles.len(), 2);
        assert_eq!(store.guild_count(), 1);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");

        let mut store = GuildConfigStore::load(&path).await.unwrap();
        assert_eq!(store.guild_count(), 0);

        store.set_bad_words("1", parse_word_list("Foo, bar"));
        store.save().await.unwrap();

        let reloaded = GuildConfigStore::load(&path).await.unwrap();
        assert_eq!(reloaded.get("1"), store.get("1"));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"badWords\""));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            GuildConfigStore::load(&path).await,
            Err(BotError::StateParse { .. })
        ));
    }
}
