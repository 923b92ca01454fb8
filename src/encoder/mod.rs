//! Update document encoding
//!
//! Serializes a [`SubstitutionDirective`] into the roster update the API
//! expects: an XML document with two `selected_position` entries for the
//! incoming player, wrapped in the JSON envelope `{"team": {"roster": ...}}`.
//!
//! The bench player being replaced never appears in the document.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::models::SubstitutionDirective;
use crate::utils::error::EncodeError;

/// JSON envelope for a roster update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub team: TeamUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamUpdate {
    /// XML update document
    pub roster: String,
}

impl UpdatePayload {
    pub fn new(roster_xml: String) -> Self {
        Self {
            team: TeamUpdate { roster: roster_xml },
        }
    }

    /// Rendered JSON body, as sent on the wire
    pub fn to_json(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode one directive into its update payload
pub fn encode_directive(directive: &SubstitutionDirective) -> Result<UpdatePayload, EncodeError> {
    Ok(UpdatePayload::new(encode_roster_xml(directive)?))
}

/// Build the XML update document for one directive
///
/// ```text
/// <roster><players><player player_id="ID">
///   <selected_position position="TARGET" is_starting="true"/>
///   <selected_position position="VACATED" is_starting="false"/>
/// </player></players></roster>
/// ```
/// (emitted without whitespace between elements)
pub fn encode_roster_xml(directive: &SubstitutionDirective) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());

    let mut player = BytesStart::new("player");
    player.push_attribute(("player_id", directive.incoming_player_id.as_str()));

    let events = [
        Event::Start(BytesStart::new("roster")),
        Event::Start(BytesStart::new("players")),
        Event::Start(player),
        Event::Empty(selected_position(&directive.target_position, true)),
        Event::Empty(selected_position(&directive.vacated_position, false)),
        Event::End(BytesEnd::new("player")),
        Event::End(BytesEnd::new("players")),
        Event::End(BytesEnd::new("roster")),
    ];

    for event in events {
        writer
            .write_event(event)
            .map_err(|e| EncodeError::Xml(e.to_string()))?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn selected_position(position: &str, is_starting: bool) -> BytesStart<'static> {
    let mut slot = BytesStart::new("selected_position");
    slot.push_attribute(("position", position));
    slot.push_attribute(("is_starting", if is_starting { "true" } else { "false" }));
    slot
}
