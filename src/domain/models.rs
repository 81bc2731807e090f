use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{HeatmapError, HeatmapResult};

pub type Slot = u8;

pub const MIN_SLOT: Slot = 1;
pub const MAX_SLOT: Slot = 10;

const GAME_NAME_LEN: (usize, usize) = (3, 16);
const TAG_LINE_LEN: (usize, usize) = (3, 6);

/// Riot ID as typed by the user, validated before any request is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerQuery {
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerQuery {
    pub fn new(game_name: &str, tag_line: &str) -> HeatmapResult<Self> {
        let game_name = game_name.trim().to_string();
        let tag_line = normalize_tag(tag_line);

        check_length("game name", &game_name, GAME_NAME_LEN)?;
        check_length("tag", &tag_line, TAG_LINE_LEN)?;

        Ok(Self { game_name, tag_line })
    }

    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Strip one optional leading `#` separator from a tag
pub fn normalize_tag(tag_line: &str) -> String {
    let trimmed = tag_line.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).to_string()
}

fn check_length(field: &str, value: &str, (min, max): (usize, usize)) -> HeatmapResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(HeatmapError::InvalidInput(format!(
            "{} must be {}-{} characters, got {}",
            field, min, max, len
        )));
    }
    Ok(())
}

/// Resolved account, immutable for the lifetime of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
    pub puuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchReference {
    pub match_id: String,
}

impl MatchReference {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPosition {
    pub x: i64,
    pub y: i64,
}

/// One timestamped snapshot of participant positions
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub timestamp_ms: u64,
    pub positions: BTreeMap<Slot, RawPosition>,
}

impl TimelineFrame {
    pub fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            positions: BTreeMap::new(),
        }
    }

    pub fn with_position(mut self, slot: Slot, x: i64, y: i64) -> Self {
        self.positions.insert(slot, RawPosition { x, y });
        self
    }

    pub fn position_of(&self, slot: Slot) -> Option<RawPosition> {
        self.positions.get(&slot).copied()
    }
}

/// Match-local participant slots mapped to account puuids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantSlotMap {
    slots: BTreeMap<Slot, String>,
}

impl ParticipantSlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: Slot, puuid: impl Into<String>) {
        self.slots.insert(slot, puuid.into());
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The single slot held by `puuid`, or `None` when it is absent or ambiguous
    pub fn slot_of(&self, puuid: &str) -> Option<Slot> {
        let mut matching = self
            .slots
            .iter()
            .filter(|(_, owner)| owner.as_str() == puuid)
            .map(|(slot, _)| *slot);

        match (matching.next(), matching.next()) {
            (Some(slot), None) => Some(slot),
            _ => None,
        }
    }
}

impl FromIterator<(Slot, String)> for ParticipantSlotMap {
    fn from_iter<I: IntoIterator<Item = (Slot, String)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// One frame's position of the tracked player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub timestamp_ms: u64,
    pub x: i64,
    pub y: i64,
}

impl RawSample {
    pub fn new(timestamp_ms: u64, x: i64, y: i64) -> Self {
        Self { timestamp_ms, x, y }
    }
}
