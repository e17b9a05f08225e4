use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One gameplay attempt row as supplied by the upstream data source.
///
/// Every field except `player_id` is nullable: the source joins several
/// tables and real exports routinely arrive with holes. Missing values are
/// degraded per-metric downstream, never rejected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub player_id: String,
    pub level_id: Option<String>,
    pub game_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub result: Option<bool>,
    pub points: Option<f64>,
    pub max_points: Option<f64>,
    pub region: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}
