//! End-to-end run tests
//!
//! Tests the complete workflow:
//! 1. Token acquisition
//! 2. Current and projected snapshot fetch (mocked)
//! 3. Roster parsing and planning
//! 4. Update dispatch

use rosterbot::auth::AuthStrategy;
use rosterbot::planner::{MatchingMode, SubstitutionPlanner};
use rosterbot::runner::{plan_snapshot_files, RosterRunner};
use rosterbot::SubstitutionDirective;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{
    expected_update, fixture_path, lineup_date, mount_snapshots, CURRENT_ROSTER_XML,
    PROJECTED_ROSTER_XML,
};
use crate::common::{roster_xml, test_config, ROSTER_PATH};

fn directive(id: &str) -> SubstitutionDirective {
    SubstitutionDirective {
        incoming_player_id: id.to_string(),
        target_position: "1B".to_string(),
        vacated_position: "1B".to_string(),
    }
}

// ============================================================================
// Complete Run Tests
// ============================================================================

#[tokio::test]
async fn test_run_dispatches_every_substitute() {
    let mock_server = MockServer::start().await;
    mount_snapshots(&mock_server, CURRENT_ROSTER_XML, PROJECTED_ROSTER_XML).await;

    for id in ["10001", "10004"] {
        Mock::given(method("PUT"))
            .and(path(ROSTER_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(expected_update(id)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let runner = RosterRunner::from_config(&test_config(&mock_server.uri())).unwrap();
    let report = runner.run_once(lineup_date()).await.unwrap();

    assert_eq!(report.lineup_date, lineup_date());
    assert_eq!(report.current_players, 4);
    assert_eq!(report.projected_players, 4);
    assert_eq!(report.directives, vec![directive("10001"), directive("10004")]);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failed_dispatches(), 0);
}

#[tokio::test]
async fn test_run_sends_updates_in_plan_order() {
    let mock_server = MockServer::start().await;
    mount_snapshots(&mock_server, CURRENT_ROSTER_XML, PROJECTED_ROSTER_XML).await;

    Mock::given(method("PUT"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let runner = RosterRunner::from_config(&test_config(&mock_server.uri())).unwrap();
    runner.run_once(lineup_date()).await.unwrap();

    let puts: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| String::from_utf8(r.body).unwrap())
        .collect();

    assert_eq!(puts.len(), 2);
    assert!(puts[0].contains(r#"player_id=\"10001\""#));
    assert!(puts[1].contains(r#"player_id=\"10004\""#));
}

#[tokio::test]
async fn test_run_without_substitutes_sends_nothing() {
    let mock_server = MockServer::start().await;
    let current = roster_xml(&[("A", "C", true), ("B", "SS", false)]);
    let projected = roster_xml(&[("X", "C", true), ("Y", "SS", false)]);
    mount_snapshots(&mock_server, &current, &projected).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let runner = RosterRunner::from_config(&test_config(&mock_server.uri())).unwrap();
    let report = runner.run_once(lineup_date()).await.unwrap();

    assert!(report.directives.is_empty());
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn test_dry_run_plans_without_dispatch() {
    let mock_server = MockServer::start().await;
    mount_snapshots(&mock_server, CURRENT_ROSTER_XML, PROJECTED_ROSTER_XML).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let runner = RosterRunner::from_config(&test_config(&mock_server.uri()))
        .unwrap()
        .with_dry_run(true);
    let report = runner.run_once(lineup_date()).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.directives.len(), 2);
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn test_one_to_one_matching_dispatches_once_per_candidate() {
    let mock_server = MockServer::start().await;
    let current = roster_xml(&[("A", "1B", false), ("B", "1B", false)]);
    let projected = roster_xml(&[("C", "1B", true)]);
    mount_snapshots(&mock_server, &current, &projected).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.planner.matching = MatchingMode::OneToOne;
    let report = RosterRunner::from_config(&config)
        .unwrap()
        .run_once(lineup_date())
        .await
        .unwrap();

    assert_eq!(report.directives.len(), 1);
}

#[tokio::test]
async fn test_run_with_client_credentials() {
    let mock_server = MockServer::start().await;
    mount_snapshots(&mock_server, CURRENT_ROSTER_XML, PROJECTED_ROSTER_XML).await;

    Mock::given(method("POST"))
        .and(path("/oauth2/get_token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-token",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.auth = AuthStrategy::ClientCredentials {
        token_url: format!("{}/oauth2/get_token", mock_server.uri()),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scope: None,
    };

    let report = RosterRunner::from_config(&config)
        .unwrap()
        .run_once(lineup_date())
        .await
        .unwrap();
    assert_eq!(report.outcomes.len(), 2);
}

// ============================================================================
// Offline Planning Tests
// ============================================================================

#[test]
fn test_plan_snapshot_files() {
    let plan = plan_snapshot_files(
        &fixture_path("current_roster.xml"),
        &fixture_path("projected_roster.xml"),
        &SubstitutionPlanner::default(),
    )
    .unwrap();

    assert_eq!(plan.current_players, 4);
    assert_eq!(plan.projected_players, 4);

    let ids: Vec<&str> = plan
        .updates
        .iter()
        .map(|u| u.directive.incoming_player_id.as_str())
        .collect();
    assert_eq!(ids, vec!["10001", "10004"]);

    let payload = serde_json::to_value(&plan.updates[0].payload).unwrap();
    assert_eq!(payload, expected_update("10001"));
}
