//! Substitution planning
//!
//! Compares the current roster with the projected lineup for the target date
//! and proposes [`SubstitutionDirective`]s for bench slots that have an
//! eligible same-position starter.
//!
//! Planning is pure and synchronous. The matching rule sits behind
//! [`MatchingStrategy`] so an alternative can replace the default without
//! touching fetching, encoding, or dispatch.
//!
//! # Strategies
//!
//! - [`NestedScan`] (default): every bench player in current-roster order is
//!   checked against every projected starter in projected order. The scan
//!   does not stop at the first match and does not consume candidates, so one
//!   bench slot can yield several directives and one starter can be proposed
//!   for several slots.
//! - [`OneToOne`]: first match wins per bench player, and each candidate is
//!   used at most once per run.
//!
//! In both, `vacated_position` is the incoming player's eligible position as
//! read from the projected snapshot, not its slot assignment.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::{Player, RosterState, SubstitutionDirective};

/// Rule that pairs bench players with substitutes
pub trait MatchingStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Produce directives in a deterministic order
    fn plan(&self, current: &RosterState, projected: &RosterState) -> Vec<SubstitutionDirective>;
}

/// Selects a [`MatchingStrategy`] from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingMode {
    #[default]
    NestedScan,
    OneToOne,
}

impl MatchingMode {
    pub fn strategy(self) -> Box<dyn MatchingStrategy> {
        match self {
            Self::NestedScan => Box::new(NestedScan),
            Self::OneToOne => Box::new(OneToOne),
        }
    }
}

impl std::fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NestedScan => "nested-scan",
            Self::OneToOne => "one-to-one",
        })
    }
}

/// Literal nested scan, no early exit and no consumption
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedScan;

impl MatchingStrategy for NestedScan {
    fn name(&self) -> &'static str {
        "nested-scan"
    }

    fn plan(&self, current: &RosterState, projected: &RosterState) -> Vec<SubstitutionDirective> {
        let mut directives = Vec::new();

        for bench in current.bench() {
            log_bench(bench);
            for candidate in projected.iter().filter(|q| is_eligible(bench, q)) {
                directives.push(directive_for(bench, candidate));
            }
        }

        directives
    }
}

/// First match per bench player, each candidate used once
#[derive(Debug, Clone, Copy, Default)]
pub struct OneToOne;

impl MatchingStrategy for OneToOne {
    fn name(&self) -> &'static str {
        "one-to-one"
    }

    fn plan(&self, current: &RosterState, projected: &RosterState) -> Vec<SubstitutionDirective> {
        let mut directives = Vec::new();
        let mut used: HashSet<&str> = HashSet::new();

        for bench in current.bench() {
            log_bench(bench);
            let candidate = projected
                .iter()
                .filter(|q| !used.contains(q.player_id.as_str()))
                .find(|q| is_eligible(bench, q));

            if let Some(candidate) = candidate {
                used.insert(candidate.player_id.as_str());
                directives.push(directive_for(bench, candidate));
            }
        }

        directives
    }
}

fn is_eligible(bench: &Player, candidate: &Player) -> bool {
    candidate.is_starting && candidate.eligible_position == bench.eligible_position
}

fn log_bench(bench: &Player) {
    info!(
        player_id = %bench.player_id,
        position = %bench.eligible_position,
        "Player is not starting"
    );
}

fn directive_for(bench: &Player, candidate: &Player) -> SubstitutionDirective {
    info!(
        incoming = %candidate.player_id,
        outgoing = %bench.player_id,
        position = %bench.eligible_position,
        "Substituting in player"
    );
    SubstitutionDirective {
        incoming_player_id: candidate.player_id.clone(),
        target_position: bench.eligible_position.clone(),
        vacated_position: candidate.eligible_position.clone(),
    }
}

/// Planner facade used by the run orchestrator
pub struct SubstitutionPlanner {
    strategy: Box<dyn MatchingStrategy>,
}

impl SubstitutionPlanner {
    pub fn new(mode: MatchingMode) -> Self {
        Self {
            strategy: mode.strategy(),
        }
    }

    /// Use a custom matching rule
    pub fn with_strategy(strategy: Box<dyn MatchingStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn plan(&self, current: &RosterState, projected: &RosterState) -> Vec<SubstitutionDirective> {
        let directives = self.strategy.plan(current, projected);
        debug!(
            strategy = self.strategy.name(),
            directives = directives.len(),
            "Planning finished"
        );
        directives
    }
}

impl Default for SubstitutionPlanner {
    fn default() -> Self {
        Self::new(MatchingMode::default())
    }
}
