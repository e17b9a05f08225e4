use chrono::{DateTime, Utc};

use crate::models::attempt::AttemptRecord;

/// An attempt record with its derived fields computed.
///
/// Normalization is total: malformed or missing fields degrade to `None`/0
/// and the record stays in the set. Metrics that need a missing field skip
/// the record individually.
#[derive(Debug, Clone)]
pub struct Attempt {
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
    /// Attempt length in whole seconds, clamped at zero. Source data is not
    /// guaranteed to have `end_time >= start_time`.
    pub duration_secs: u64,
    /// Second `-`-separated token of `level_id`, when it parses as a number.
    pub level_number: Option<u32>,
}

impl From<AttemptRecord> for Attempt {
    fn from(rec: AttemptRecord) -> Self {
        let duration_secs = clamped_duration_secs(rec.start_time, rec.end_time);
        let level_number = rec.level_id.as_deref().and_then(parse_level_number);
        Self {
            player_id: rec.player_id,
            level_id: rec.level_id,
            game_id: rec.game_id,
            start_time: rec.start_time,
            end_time: rec.end_time,
            result: rec.result,
            points: rec.points,
            max_points: rec.max_points,
            region: rec.region,
            registration_date: rec.registration_date,
            duration_secs,
            level_number,
        }
    }
}

impl Attempt {
    /// Missing `result` counts as a failed attempt.
    pub fn is_success(&self) -> bool {
        self.result.unwrap_or(false)
    }

    /// Successful attempt with full points. False when either score is missing.
    pub fn is_perfect(&self) -> bool {
        self.is_success()
            && matches!((self.points, self.max_points), (Some(p), Some(m)) if p == m)
    }
}

pub fn normalize(records: Vec<AttemptRecord>) -> Vec<Attempt> {
    records.into_iter().map(Attempt::from).collect()
}

fn clamped_duration_secs(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> u64 {
    match (start, end) {
        (Some(start), Some(end)) => {
            let secs = (end - start).num_seconds();
            secs.max(0) as u64
        }
        _ => 0,
    }
}

fn parse_level_number(level_id: &str) -> Option<u32> {
    level_id.split('-').nth(1)?.trim().parse().ok()
}
