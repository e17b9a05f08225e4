use serde::Serialize;

use crate::services::format::PlayTime;

/// Per-game operational report over one query window.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    #[serde(rename = "coreKpi")]
    pub core_kpi: Option<CoreKpi>,
    #[serde(rename = "topRegions")]
    pub top_regions: Option<Vec<RegionPlayers>>,
    #[serde(rename = "levelsDistribution")]
    pub levels_distribution: Option<Vec<LevelOutcome>>,
    #[serde(rename = "playersRetention")]
    pub players_retention: Option<Vec<LevelRetention>>,
    #[serde(rename = "avgTimePerLevel")]
    pub avg_time_per_level: Option<Vec<LevelAvgTime>>,
}

impl GameReport {
    pub fn empty() -> Self {
        Self {
            core_kpi: None,
            top_regions: None,
            levels_distribution: None,
            players_retention: None,
            avg_time_per_level: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreKpi {
    #[serde(rename = "totalAttempts")]
    pub total_attempts: u64,
    /// Percent of successful attempts, one decimal.
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    #[serde(rename = "uniquePlayers")]
    pub unique_players: u64,
    #[serde(rename = "newPlayers")]
    pub new_players: u64,
    #[serde(rename = "avgPlayTimePerPlayer")]
    pub avg_play_time_per_player: PlayTime,
    /// This game's share of all attempts in the window, percent, one decimal.
    #[serde(rename = "gameShare")]
    pub game_share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionPlayers {
    pub region: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelOutcome {
    pub level: String,
    #[serde(rename = "totalAttempts")]
    pub total_attempts: u64,
    #[serde(rename = "successRate")]
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRetention {
    pub level: String,
    #[serde(rename = "uniquePlayers")]
    pub unique_players: u64,
    /// Distinct players on this level as a percent of all distinct players
    /// in the set, one decimal.
    #[serde(rename = "sharePercent")]
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelAvgTime {
    pub level: String,
    /// Average attempt duration in minutes, two decimals.
    pub minutes: f64,
}
