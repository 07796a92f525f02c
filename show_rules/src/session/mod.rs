//! Session state management - the authoritative state machine for one show.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::scenarios::ScenarioBank;

/// Number of rounds in a standard show.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Unique identifier for game sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil/empty session ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse-grained stage of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Collecting the player's name and stating the rules.
    #[default]
    Intro,
    /// Rounds are being issued and performed.
    Playing,
    /// Every round has been played; nothing left to issue.
    Done,
}

/// One completed scenario-performance-reaction cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub scenario: String,
    pub reaction: String,
}

/// The complete state of one game session.
///
/// Created at connection, destroyed with the session; never persisted. All
/// mutation goes through the three methods below, invoked one at a time by
/// the tool layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,

    /// Set at most once per session through an explicit naming step.
    pub player_name: Option<String>,

    pub phase: Phase,

    /// Number of scenarios issued so far.
    pub current_round: u32,

    /// Upper bound on issued scenarios.
    pub max_rounds: u32,

    /// Scenario issued but not yet paired with a recorded reaction.
    pub current_scenario: Option<String>,

    /// Completed rounds, in order. Append-only.
    pub rounds: Vec<RoundRecord>,
}

impl GameSession {
    /// Create a fresh session waiting for a player name.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            player_name: None,
            phase: Phase::Intro,
            current_round: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            current_scenario: None,
            rounds: Vec::new(),
        }
    }

    /// Create a session pre-seeded with a known player, already playing.
    pub fn with_player(name: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.start(name);
        session
    }

    /// Record the player's name and begin the rounds.
    ///
    /// Calling this again overwrites the name and restarts round counting.
    pub fn start(&mut self, name: impl Into<String>) {
        let name = name.into();
        info!(session = %self.id, player = %name, "game started");
        self.player_name = Some(name);
        self.phase = Phase::Playing;
        self.current_round = 0;
    }

    /// Issue the next scenario, drawn from `bank`.
    ///
    /// Returns `None` once every round has been issued, marking the session
    /// done. An empty bank also yields `None` but leaves the phase and the
    /// round counter untouched; the caller decides how to surface that.
    pub fn next_scenario(&mut self, bank: &ScenarioBank) -> Option<String> {
        if self.current_round >= self.max_rounds {
            self.phase = Phase::Done;
            return None;
        }

        let scenario = bank.random_scenario()?.to_string();
        self.current_scenario = Some(scenario.clone());
        self.current_round += 1;
        Some(scenario)
    }

    /// Pair the pending scenario with the host's reaction.
    ///
    /// With no scenario pending this is a silent no-op.
    pub fn record_reaction(&mut self, reaction: impl Into<String>) {
        if let Some(scenario) = self.current_scenario.take() {
            self.rounds.push(RoundRecord {
                scenario,
                reaction: reaction.into(),
            });
            info!(session = %self.id, round = self.current_round, "round recorded");
        }
    }

    /// Check whether the show has run out of rounds.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Check whether a scenario is awaiting its recorded reaction.
    pub fn has_pending_scenario(&self) -> bool {
        self.current_scenario.is_some()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
