use serde::Serialize;

/// Per-player diagnostic report. Each fragment is `None` when the filtered
/// record set was empty, mirroring the dashboard's null sections.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    #[serde(rename = "mostLostLevels")]
    pub most_lost_levels: Option<MostLostLevels>,
    #[serde(rename = "maxPointsRatio")]
    pub max_points_ratio: Option<MaxPointsRatio>,
    #[serde(rename = "attemptsPerGame")]
    pub attempts_per_game: Option<Vec<GameAttempts>>,
    #[serde(rename = "attemptsPerLevel")]
    pub attempts_per_level: Option<Vec<LevelBucket>>,
    #[serde(rename = "timeStats")]
    pub time_stats: Option<TimeStats>,
}

impl PlayerReport {
    pub fn empty() -> Self {
        Self {
            most_lost_levels: None,
            max_points_ratio: None,
            attempts_per_game: None,
            attempts_per_level: None,
            time_stats: None,
        }
    }
}

/// Level(s) tied for the most failed attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostLostLevels {
    pub levels: Vec<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxPointsRatio {
    /// Rounded share of perfect wins among wins, 0–100.
    pub percentage: u32,
    pub total: u64,
    pub perfect: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameAttempts {
    pub game: String,
    pub attempts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelBucket {
    pub level: u32,
    pub count: u64,
    /// Share of bucketed attempts as a fraction in [0, 1], three decimals.
    /// The dashboard formats this one itself, unlike the 0–100 rate fields.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    #[serde(rename = "total")]
    pub total_secs: u64,
    #[serde(rename = "longestLevel")]
    pub longest_level: Option<String>,
    #[serde(rename = "longestLevelTime")]
    pub longest_level_secs: u64,
}
