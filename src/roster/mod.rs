//! Roster snapshot parsing
//!
//! Turns the XML roster document returned by the fantasy API into a
//! [`RosterState`]. Both the current roster and the projected lineup for a
//! date share this schema.
//!
//! Element names are matched by local name, so the namespaced documents the
//! API returns parse the same as bare fixtures.

use roxmltree::{Document, Node};

use crate::models::{Player, RosterState};
use crate::utils::error::MalformedRosterError;

/// Element names accepted as the roster container
const ROSTER_CONTAINERS: &[&str] = &["team-roster", "roster"];

const PLAYER: &str = "player";
const PLAYER_ID: &str = "player_id";
const ELIGIBLE_POSITIONS: &str = "eligible_positions";
const POSITION: &str = "position";
const SELECTED_POSITION: &str = "selected_position";
const IS_STARTING: &str = "is_starting";

/// Build a roster state from a raw roster document
///
/// # Errors
///
/// Returns [`MalformedRosterError`] when the document is not XML, has no
/// roster container, or a player entry lacks any required field. Nothing is
/// defaulted.
pub fn build_roster_state(xml: &str) -> Result<RosterState, MalformedRosterError> {
    let doc = Document::parse(xml).map_err(|e| MalformedRosterError::InvalidXml(e.to_string()))?;

    let container = doc
        .root_element()
        .descendants()
        .find(|n| n.is_element() && ROSTER_CONTAINERS.contains(&n.tag_name().name()))
        .ok_or(MalformedRosterError::MissingRosterContainer)?;

    let mut state = RosterState::new();
    for (index, node) in container
        .descendants()
        .filter(|n| is_element_named(n, PLAYER))
        .enumerate()
    {
        state.insert(parse_player(node, index)?);
    }

    tracing::debug!(
        players = state.len(),
        entries = state.order().len(),
        "Built roster state"
    );

    Ok(state)
}

fn parse_player(node: Node<'_, '_>, index: usize) -> Result<Player, MalformedRosterError> {
    let player_id = player_id(node).ok_or(MalformedRosterError::MissingPlayerId { index })?;

    let eligible_position = first_descendant(node, ELIGIBLE_POSITIONS)
        .and_then(|positions| first_descendant(positions, POSITION))
        .and_then(non_empty_text)
        .ok_or_else(|| MalformedRosterError::MissingEligiblePosition {
            player_id: player_id.clone(),
        })?;

    let selected = first_descendant(node, SELECTED_POSITION).ok_or_else(|| {
        MalformedRosterError::MissingSelectedPosition {
            player_id: player_id.clone(),
        }
    })?;

    let is_starting = match selected.attribute(IS_STARTING) {
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            return Err(MalformedRosterError::InvalidStartingFlag {
                player_id,
                value: other.to_string(),
            })
        }
        None => return Err(MalformedRosterError::MissingStartingFlag { player_id }),
    };

    Ok(Player {
        player_id,
        eligible_position,
        is_starting,
    })
}

/// `player_id` attribute, falling back to a `player_id` child element
fn player_id(node: Node<'_, '_>) -> Option<String> {
    if let Some(id) = node.attribute(PLAYER_ID).map(str::trim).filter(|s| !s.is_empty()) {
        return Some(id.to_string());
    }
    node.children()
        .find(|n| is_element_named(n, PLAYER_ID))
        .and_then(non_empty_text)
}

fn first_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| is_element_named(n, name))
}

fn is_element_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn non_empty_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
