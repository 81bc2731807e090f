use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    ParticipantSlotMap, PlayerIdentity, RawPosition, Slot, TimelineFrame, MAX_SLOT, MIN_SLOT,
};

// --- Riot API Response Structures ---

/// Account-v1 `by-riot-id` response
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

impl AccountResponse {
    /// Falls back to the submitted Riot ID when the provider omits it
    pub fn into_identity(self, game_name: &str, tag_line: &str) -> PlayerIdentity {
        PlayerIdentity {
            game_name: self.game_name.unwrap_or_else(|| game_name.to_string()),
            tag_line: self.tag_line.unwrap_or_else(|| tag_line.to_string()),
            puuid: self.puuid,
        }
    }
}

/// Match-v5 timeline response
#[derive(Debug, Deserialize, Serialize)]
pub struct TimelineResponse {
    pub info: TimelineInfo,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TimelineInfo {
    /// Kept untyped so one malformed frame does not reject the whole timeline
    pub frames: Vec<Value>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameRecord {
    timestamp: u64,
    #[serde(default)]
    participant_frames: HashMap<String, Value>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ParticipantFrameRecord {
    position: PositionRecord,
}

#[derive(Debug, Deserialize, Serialize)]
struct PositionRecord {
    x: i64,
    y: i64,
}

impl TimelineResponse {
    /// Typed frames sorted by timestamp; malformed frames are dropped
    pub fn into_frames(self) -> Vec<TimelineFrame> {
        let mut frames: Vec<TimelineFrame> = self
            .info
            .frames
            .into_iter()
            .filter_map(parse_frame)
            .collect();

        frames.sort_by_key(|frame| frame.timestamp_ms);
        frames
    }
}

fn parse_frame(value: Value) -> Option<TimelineFrame> {
    let record: FrameRecord = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
            debug!("Dropping malformed frame: {}", e);
            return None;
        }
    };

    let mut frame = TimelineFrame::new(record.timestamp);
    for (key, participant) in record.participant_frames {
        if let Some((slot, position)) = parse_participant_position(&key, participant) {
            frame.positions.insert(slot, position);
        }
    }
    Some(frame)
}

fn parse_participant_position(key: &str, value: Value) -> Option<(Slot, RawPosition)> {
    let slot = parse_slot(key)?;
    let record: ParticipantFrameRecord = serde_json::from_value(value).ok()?;
    Some((
        slot,
        RawPosition {
            x: record.position.x,
            y: record.position.y,
        },
    ))
}

fn parse_slot(key: &str) -> Option<Slot> {
    let slot = key.trim().parse::<Slot>().ok()?;
    (MIN_SLOT..=MAX_SLOT).contains(&slot).then_some(slot)
}

/// Match-v5 match response, only the roster is read
#[derive(Debug, Deserialize, Serialize)]
pub struct MatchResponse {
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MatchInfo {
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub participant_id: i64,
    pub puuid: String,
}

impl MatchResponse {
    pub fn into_roster(self) -> ParticipantSlotMap {
        self.info
            .participants
            .into_iter()
            .filter_map(|p| {
                let slot = Slot::try_from(p.participant_id).ok()?;
                (MIN_SLOT..=MAX_SLOT)
                    .contains(&slot)
                    .then_some((slot, p.puuid))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_identity_falls_back_to_query() {
        let account: AccountResponse =
            serde_json::from_value(json!({ "puuid": "abc-123", "gameName": "Faker" })).unwrap();
        let identity = account.into_identity("faker", "KR1");

        assert_eq!(identity.puuid, "abc-123");
        assert_eq!(identity.game_name, "Faker");
        assert_eq!(identity.tag_line, "KR1");
    }

    #[test]
    fn test_timeline_frames_are_parsed_and_sorted() {
        let timeline: TimelineResponse = serde_json::from_value(json!({
            "metadata": { "matchId": "BR1_1" },
            "info": {
                "frameInterval": 60000,
                "frames": [
                    {
                        "timestamp": 60000,
                        "participantFrames": {
                            "1": { "position": { "x": 1200, "y": 900 }, "level": 2 },
                            "2": { "position": { "x": 14000, "y": 14200 } }
                        }
                    },
                    {
                        "timestamp": 0,
                        "participantFrames": {
                            "1": { "position": { "x": 554, "y": 581 } }
                        }
                    }
                ]
            }
        }))
        .unwrap();

        let frames = timeline.into_frames();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp_ms, 0);
        assert_eq!(frames[1].position_of(2), Some(RawPosition { x: 14000, y: 14200 }));
    }

    #[test]
    fn test_malformed_frames_and_slots_are_dropped() {
        let timeline: TimelineResponse = serde_json::from_value(json!({
            "info": {
                "frames": [
                    { "participantFrames": { "1": { "position": { "x": 1, "y": 1 } } } },
                    { "timestamp": -5, "participantFrames": {} },
                    {
                        "timestamp": 120000,
                        "participantFrames": {
                            "1": { "level": 3 },
                            "11": { "position": { "x": 5, "y": 5 } },
                            "x": { "position": { "x": 5, "y": 5 } },
                            "4": { "position": { "x": 7000, "y": 7100 } }
                        }
                    }
                ]
            }
        }))
        .unwrap();

        let frames = timeline.into_frames();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].positions.len(), 1);
        assert_eq!(frames[0].position_of(4), Some(RawPosition { x: 7000, y: 7100 }));
    }

    #[test]
    fn test_roster_maps_slots_to_puuids() {
        let response: MatchResponse = serde_json::from_value(json!({
            "info": {
                "participants": [
                    { "participantId": 1, "puuid": "p1", "championName": "Ahri" },
                    { "participantId": 6, "puuid": "p6" },
                    { "participantId": 0, "puuid": "bogus" }
                ]
            }
        }))
        .unwrap();

        let roster = response.into_roster();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.slot_of("p6"), Some(6));
        assert_eq!(roster.slot_of("bogus"), None);
    }
}
