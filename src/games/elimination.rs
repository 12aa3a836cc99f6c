use poise::serenity_prelude::UserId;
use rand::Rng;

/// Range of the elimination index, fixed regardless of the player count
pub const CHAMBERS: usize = 6;
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    AlreadyJoined,
    AlreadyStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    NotEnoughPlayers { joined: usize },
    AlreadyStarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationResult {
    pub eliminated: UserId,
    pub survivors: Vec<UserId>,
}

/// Group lobby that eliminates exactly one player when started
#[derive(Debug, Clone)]
pub struct Elimination {
    players: Vec<UserId>,
    started: bool,
    chamber: usize,
}

impl Elimination {
    pub fn new(chamber: usize) -> Self {
        Self {
            players: Vec::new(),
            started: false,
            chamber: chamber % CHAMBERS,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..CHAMBERS))
    }

    pub fn players(&self) -> &[UserId] {
        &self.players
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Returns the player count after joining
    pub fn join(&mut self, user: UserId) -> Result<usize, JoinError> {
        if self.started {
            return Err(JoinError::AlreadyStarted);
        }
        if self.players.contains(&user) {
            return Err(JoinError::AlreadyJoined);
        }
        self.players.push(user);
        Ok(self.players.len())
    }

    pub fn start(&mut self) -> Result<EliminationResult, StartError> {
        if self.started {
            return Err(StartError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(StartError::NotEnoughPlayers {
                joined: self.players.len(),
            });
        }
        self.started = true;

        let eliminated = self.players[self.chamber % self.players.len()];
        let survivors = self
            .players
            .iter()
            .copied()
            .filter(|id| *id != eliminated)
            .collect();

        Ok(EliminationResult {
            eliminated,
            survivors,
        })
    }
}
