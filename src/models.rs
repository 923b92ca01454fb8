// Core data structures for the roster pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::DispatchOutcome;

/// One roster entry as read from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    /// First listed eligible position; doubles as the player's slot when a
    /// directive records what it vacates.
    pub eligible_position: String,
    pub is_starting: bool,
}

impl Player {
    pub fn new(
        player_id: impl Into<String>,
        eligible_position: impl Into<String>,
        is_starting: bool,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            eligible_position: eligible_position.into(),
            is_starting,
        }
    }
}

/// Players keyed by id, plus the provider's entry order
///
/// `order` keeps one id per entry in the snapshot, duplicates included. The
/// map keeps the last entry seen for a repeated id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterState {
    players: HashMap<String, Player>,
    order: Vec<String>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a player entry in snapshot order
    pub fn insert(&mut self, player: Player) {
        self.order.push(player.player_id.clone());
        self.players.insert(player.player_id.clone(), player);
    }

    pub fn get(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    /// Ids in the order the provider returned them
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Walk entries in snapshot order
    pub fn iter(&self) -> impl Iterator<Item = &Player> + '_ {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    /// Number of distinct players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players currently in an active slot
    pub fn starters(&self) -> impl Iterator<Item = &Player> + '_ {
        self.iter().filter(|p| p.is_starting)
    }

    /// Players currently on the bench
    pub fn bench(&self) -> impl Iterator<Item = &Player> + '_ {
        self.iter().filter(|p| !p.is_starting)
    }
}

impl FromIterator<Player> for RosterState {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut state = Self::new();
        for player in iter {
            state.insert(player);
        }
        state
    }
}

/// Proposed single-player slot change
///
/// Activate `incoming_player_id` at `target_position` and mark its previous
/// slot (`vacated_position`) inactive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstitutionDirective {
    pub incoming_player_id: String,
    pub target_position: String,
    pub vacated_position: String,
}

impl std::fmt::Display for SubstitutionDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} (vacates {})",
            self.incoming_player_id, self.target_position, self.vacated_position
        )
    }
}

/// Summary of one invocation
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub lineup_date: NaiveDate,
    pub current_players: usize,
    pub projected_players: usize,
    pub directives: Vec<SubstitutionDirective>,
    pub outcomes: Vec<DispatchOutcome>,
    pub dry_run: bool,
}

impl RunReport {
    /// Dispatches that came back with a non-2xx status
    pub fn failed_dispatches(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}
