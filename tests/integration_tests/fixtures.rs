//! Test fixtures for integration tests
//!
//! Provides roster snapshots and helpers for mounting them on a mock server

use std::path::PathBuf;

use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::ROSTER_PATH;

/// Current roster: 8967 (1B) and 9102 (SP) are on the bench
pub const CURRENT_ROSTER_XML: &str = include_str!("../fixtures/current_roster.xml");

/// Projected lineup for 2024-05-10: 10001 and 10004 start at 1B
pub const PROJECTED_ROSTER_XML: &str = include_str!("../fixtures/projected_roster.xml");

/// Document without any roster container
pub const MALFORMED_ROSTER_XML: &str =
    r#"<fantasy_content><team><team_id>1</team_id></team></fantasy_content>"#;

pub fn lineup_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

pub fn projected_path() -> String {
    format!("{ROSTER_PATH};date=2024-05-10")
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Update document the API should receive for a 1B substitute
pub fn expected_update(player_id: &str) -> serde_json::Value {
    serde_json::json!({
        "team": {
            "roster": format!(
                r#"<roster><players><player player_id="{player_id}"><selected_position position="1B" is_starting="true"/><selected_position position="1B" is_starting="false"/></player></players></roster>"#
            )
        }
    })
}

/// Serve both snapshots
pub async fn mount_snapshots(server: &MockServer, current: &str, projected: &str) {
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(current))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(projected_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string(projected))
        .mount(server)
        .await;
}
