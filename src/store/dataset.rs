use super::*;
use crate::stats::PlayerStat;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Entire contents of the statistics file.
/// Either key may be absent on disk; both default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub game_results: Vec<MatchRecord>,
    pub player_stats: BTreeMap<String, PlayerStat>,
}

impl Dataset {
    pub fn stat(&self, player: &str) -> Option<&PlayerStat> {
        self.player_stats.get(player)
    }
    /// Pretty JSON with four-space indentation.
    pub fn to_json(&self) -> anyhow::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        self.serialize(&mut serializer)?;
        Ok(bytes)
    }
}

impl TryFrom<&str> for Dataset {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Ok(serde_json::from_str(s)?)
    }
}
