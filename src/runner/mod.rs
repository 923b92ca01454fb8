//! Single-run orchestration
//!
//! One invocation walks the pipeline strictly in order: authenticate, fetch
//! and build the current roster, fetch and build the projected lineup for the
//! target date, plan, then encode and dispatch each directive one after the
//! other. The first error aborts the rest of the run; directives already
//! dispatched stay dispatched.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

use crate::auth::Authenticator;
use crate::client::{RosterApi, YahooRosterClient};
use crate::config::Config;
use crate::encoder::{encode_directive, UpdatePayload};
use crate::error::Result;
use crate::models::{RosterState, RunReport, SubstitutionDirective};
use crate::planner::SubstitutionPlanner;
use crate::roster::build_roster_state;

/// A directive together with the payload that carries it
#[derive(Debug, Clone, Serialize)]
pub struct PlannedUpdate {
    pub directive: SubstitutionDirective,
    pub payload: UpdatePayload,
}

/// Planning result for one pair of snapshots
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPlan {
    pub current_players: usize,
    pub projected_players: usize,
    pub updates: Vec<PlannedUpdate>,
}

/// Plan over two built states and encode every directive
pub fn plan_states(
    current: &RosterState,
    projected: &RosterState,
    planner: &SubstitutionPlanner,
) -> Result<Vec<PlannedUpdate>> {
    planner
        .plan(current, projected)
        .into_iter()
        .map(|directive| -> Result<PlannedUpdate> {
            let payload = encode_directive(&directive)?;
            let body = payload.to_json()?;
            info!(directive = %directive, payload = %body, "Constructed payload");
            Ok(PlannedUpdate { directive, payload })
        })
        .collect()
}

/// Build both roster states from raw documents, then [`plan_states`]
pub fn plan_snapshots(
    current_xml: &str,
    projected_xml: &str,
    planner: &SubstitutionPlanner,
) -> Result<SnapshotPlan> {
    let current = build_roster_state(current_xml)?;
    let projected = build_roster_state(projected_xml)?;

    Ok(SnapshotPlan {
        current_players: current.len(),
        projected_players: projected.len(),
        updates: plan_states(&current, &projected, planner)?,
    })
}

/// [`plan_snapshots`] over snapshot files saved on disk
pub fn plan_snapshot_files(
    current: &Path,
    projected: &Path,
    planner: &SubstitutionPlanner,
) -> Result<SnapshotPlan> {
    let current_xml = std::fs::read_to_string(current)?;
    let projected_xml = std::fs::read_to_string(projected)?;
    plan_snapshots(&current_xml, &projected_xml, planner)
}

/// Runs the roster update pipeline once per call
pub struct RosterRunner<A> {
    api: A,
    auth: Authenticator,
    planner: SubstitutionPlanner,
    dry_run: bool,
}

impl RosterRunner<YahooRosterClient> {
    /// Wire the HTTP client, authenticator and planner from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = YahooRosterClient::new(config.api.clone(), &config.http)?;
        let auth = Authenticator::new(config.auth.clone(), &config.http)?;
        let planner = SubstitutionPlanner::new(config.planner.matching);
        Ok(Self::new(api, auth, planner))
    }
}

impl<A: RosterApi> RosterRunner<A> {
    pub fn new(api: A, auth: Authenticator, planner: SubstitutionPlanner) -> Self {
        Self {
            api,
            auth,
            planner,
            dry_run: false,
        }
    }

    /// Plan and encode, but never dispatch
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute one run for `lineup_date`
    #[instrument(skip(self))]
    pub async fn run_once(&self, lineup_date: NaiveDate) -> Result<RunReport> {
        info!(
            auth_mode = self.auth.strategy().mode(),
            strategy = self.planner.strategy_name(),
            dry_run = self.dry_run,
            "Starting roster update run"
        );

        let token = self.auth.bearer_token().await?;

        let current_xml = self.api.fetch_roster(&token, None).await?;
        let current = build_roster_state(&current_xml)?;

        let projected_xml = self.api.fetch_roster(&token, Some(lineup_date)).await?;
        let projected = build_roster_state(&projected_xml)?;

        info!(
            current_players = current.len(),
            projected_players = projected.len(),
            "Roster snapshots loaded"
        );

        let updates = plan_states(&current, &projected, &self.planner)?;

        let mut outcomes = Vec::with_capacity(updates.len());
        if !self.dry_run {
            for update in &updates {
                outcomes.push(self.api.update_roster(&token, &update.payload).await?);
            }
        }

        let report = RunReport {
            lineup_date,
            current_players: current.len(),
            projected_players: projected.len(),
            directives: updates.into_iter().map(|u| u.directive).collect(),
            outcomes,
            dry_run: self.dry_run,
        };

        info!(
            directives = report.directives.len(),
            dispatched = report.outcomes.len(),
            rejected = report.failed_dispatches(),
            "Roster update run completed"
        );

        Ok(report)
    }
}
