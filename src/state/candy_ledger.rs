use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::guild_config::write_atomic;
use crate::error::{BotError, Result};

/// Candy totals per server, as stored in `candies.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandyData {
    #[serde(default)]
    pub servers: HashMap<String, ServerCandies>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerCandies {
    #[serde(default)]
    pub candies: HashMap<String, CandyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandyEntry {
    /// Last seen username
    pub username: String,
    pub total: u64,
}

/// One row of the `/see` ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub user_id: String,
    pub username: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<RankedEntry>,
    pub server_total: u64,
}

/// The candy ledger plus the file it is flushed to
#[derive(Debug, Clone)]
pub struct CandyLedger {
    path: PathBuf,
    data: CandyData,
}

impl CandyLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: CandyData::default(),
        }
    }

    /// Load from file. A missing file is an empty ledger.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let data = serde_json::from_str(&content).map_err(|e| BotError::StateParse {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(Self { path, data })
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
        let content = serde_json::to_string_pretty(&self.data)?;
        write_atomic(&self.path, &content).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &CandyData {
        &self.data
    }

    pub fn total(&self, guild_id: &str, user_id: &str) -> Option<u64> {
        self.data
            .servers
            .get(guild_id)
            .and_then(|server| server.candies.get(user_id))
            .map(|entry| entry.total)
    }

    /// Add candies, creating the record if needed. Returns the new total.
    pub fn credit(&mut self, guild_id: &str, user_id: &str, username: &str, amount: u64) -> u64 {
        let entry = self
            .data
            .servers
            .entry(guild_id.to_string())
            .or_default()
            .candies
            .entry(user_id.to_string())
            .or_insert_with(|| CandyEntry {
                username: username.to_string(),
                total: 0,
            });

        entry.total = entry.total.saturating_add(amount);
        entry.username = username.to_string();
        entry.total
    }

    /// Remove candies, never going below zero. Returns `None` when the user
    /// has no record in this server.
    pub fn debit(
        &mut self,
        guild_id: &str,
        user_id: &str,
        username: &str,
        amount: u64,
    ) -> Option<u64> {
        let entry = self
            .data
            .servers
            .get_mut(guild_id)?
            .candies
            .get_mut(user_id)?;

        entry.total = entry.total.saturating_sub(amount);
        entry.username = username.to_string();
        Some(entry.total)
    }

    /// Users ordered by descending total, ties broken by username
    pub fn leaderboard(&self, guild_id: &str) -> Leaderboard {
        let mut entries: Vec<RankedEntry> = self
            .data
            .servers
            .get(guild_id)
            .map(|server| {
                server
                    .candies
                    .iter()
                    .map(|(user_id, entry)| RankedEntry {
                        user_id: user_id.clone(),
                        username: entry.username.clone(),
                        total: entry.total,
                    })
                    .collect()
            })
            .unwrap_or_default();

        entries.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.username.cmp(&b.username))
        });
        let server_total = entries.iter().map(|e| e.total).sum();

        Leaderboard {
            entries,
            server_total,
        }
    }
}

/// Shared candy ledger type
pub type SharedCandyLedger = Arc<tokio::sync::RwLock<CandyLedger>>;

pub fn create_shared_candy_ledger(ledger: CandyLedger) -> SharedCandyLedger {
    Arc::new(tokio::sync::RwLock::new(ledger))
}
