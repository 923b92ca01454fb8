//! Common test utilities

use rosterbot::config::{ApiConfig, Config, HttpConfig, PlannerConfig};
use rosterbot::auth::AuthStrategy;
use rosterbot::utils::retry::RetryConfig;

/// Build one `<player>` entry in the roster schema
pub fn player_xml(id: &str, position: &str, is_starting: bool) -> String {
    format!(
        r#"<player player_id="{id}"><eligible_positions><position>{position}</position></eligible_positions><selected_position position="{position}" is_starting="{is_starting}"/></player>"#
    )
}

/// Wrap player entries in a roster document
pub fn roster_xml(players: &[(&str, &str, bool)]) -> String {
    let entries: String = players
        .iter()
        .map(|(id, pos, starting)| player_xml(id, pos, *starting))
        .collect();
    format!("<fantasy_content><team><team-roster><players>{entries}</players></team-roster></team></fantasy_content>")
}

/// Config pointing at a mock server with a static token and fast retries
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            game_key: "mlb".to_string(),
            league_id: "123456".to_string(),
            team_id: "1".to_string(),
        },
        auth: AuthStrategy::StaticToken {
            access_token: "test-token".to_string(),
        },
        http: test_http(),
        planner: PlannerConfig::default(),
    }
}

/// HTTP settings with millisecond backoff
#[allow(dead_code)]
pub fn test_http() -> HttpConfig {
    HttpConfig {
        request_timeout_secs: 5,
        retry: RetryConfig::with_delays(2, 1, 10),
        ..HttpConfig::default()
    }
}

/// Path of the roster resource for the test config
#[allow(dead_code)]
pub const ROSTER_PATH: &str = "/game/mlb/league/123456/team/1/roster";
