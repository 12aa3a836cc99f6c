use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::games::{Game, GameKind};
use crate::interaction_id::{Owner, SessionId};

/// Whether a session survives the event that just touched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Keep,
    End,
}

/// In-memory game sessions. Nothing here is persisted; the store lives as
/// long as the bot process.
///
/// Mutations go through a DashMap entry, which holds the shard lock for the
/// key, so events for the same session are applied one at a time. Closures
/// passed to `update`/`advance` must not call back into the store.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Game>,
    next_seq: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new session and return its key
    pub fn create(&self, owner: Owner, game: Game) -> SessionId {
        let id = SessionId {
            kind: game.kind(),
            owner,
            created_at_ms: chrono::Utc::now().timestamp_millis(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.sessions.insert(id, game);
        id
    }

    /// Snapshot of a session
    pub fn get(&self, id: &SessionId) -> Option<Game> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Mutate a session in place. Returns `None` when it does not exist.
    pub fn update<R>(&self, id: &SessionId, mutator: impl FnOnce(&mut Game) -> R) -> Option<R> {
        self.sessions.get_mut(id).map(|mut entry| mutator(entry.value_mut()))
    }

    /// Mutate a session and drop it in the same critical section when the
    /// mutator reports the game is over.
    pub fn advance<R>(
        &self,
        id: &SessionId,
        mutator: impl FnOnce(&mut Game) -> (R, Lifecycle),
    ) -> Option<R> {
        match self.sessions.entry(*id) {
            Entry::Occupied(mut entry) => {
                let (result, lifecycle) = mutator(entry.get_mut());
                if lifecycle == Lifecycle::End {
                    entry.remove();
                }
                Some(result)
            }
            Entry::Vacant(_) => None,
        }
    }

    pub fn remove(&self, id: &SessionId) -> Option<Game> {
        self.sessions.remove(id).map(|(_, game)| game)
    }

    /// Oldest open session of `kind` belonging to `owner`
    pub fn find_oldest(&self, kind: GameKind, owner: Owner) -> Option<SessionId> {
        self.sessions
            .iter()
            .map(|entry| *entry.key())
            .filter(|id| id.kind == kind && id.owner == owner)
            .min_by_key(|id| id.seq)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session, used on shutdown
    pub fn clear(&self) {
        self.sessions.clear();
    }
}

pub type SharedSessionStore = Arc<SessionStore>;

pub fn create_shared_session_store() -> SharedSessionStore {
    Arc::new(SessionStore::new())
}
