use chrono::{DateTime, Utc};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::normalize::Attempt;

/// Game selector value meaning "no game restriction".
pub const ALL_GAMES: &str = "all";

/// Inclusive `[start, end]` query window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default)]
pub struct Window {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Window {
    /// Validates the bounds before any report computation runs. A window
    /// with both bounds set and `end < start` is a caller error.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AnalyticsResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(AnalyticsError::InvalidWindow(format!(
                    "end {end} precedes start {start}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| instant >= s) && self.end.map_or(true, |e| instant <= e)
    }
}

/// Query criteria restricting an attempt set. Absent criteria pass
/// everything through.
#[derive(Debug, Clone, Default)]
pub struct AttemptFilter {
    pub player_id: Option<String>,
    pub window: Window,
    pub game: Option<String>,
}

impl AttemptFilter {
    pub fn retain(&self, attempts: Vec<Attempt>) -> Vec<Attempt> {
        let before = attempts.len();
        let kept: Vec<_> = attempts.into_iter().filter(|a| self.matches(a)).collect();
        tracing::debug!(before, after = kept.len(), "filtered attempt set");
        kept
    }

    fn matches(&self, attempt: &Attempt) -> bool {
        if let Some(player_id) = &self.player_id {
            if attempt.player_id != *player_id {
                return false;
            }
        }
        // A record missing a timestamp cannot satisfy a bound that needs it.
        if let Some(start) = self.window.start {
            if !attempt.start_time.is_some_and(|t| t >= start) {
                return false;
            }
        }
        if let Some(end) = self.window.end {
            if !attempt.end_time.is_some_and(|t| t <= end) {
                return false;
            }
        }
        if let Some(game) = self.game.as_deref().filter(|g| *g != ALL_GAMES) {
            if attempt.game_id.as_deref() != Some(game) {
                return false;
            }
        }
        true
    }
}
