//! Player-report calculators. Each is a pure function over the filtered
//! attempt set and returns `None` only when the set is empty.

use crate::models::player_report::{
    GameAttempts, LevelBucket, MaxPointsRatio, MostLostLevels, PlayerReport, TimeStats,
};
use crate::normalize::Attempt;
use crate::services::format::round3;

pub fn build_player_report(attempts: &[Attempt]) -> PlayerReport {
    if attempts.is_empty() {
        tracing::debug!("empty attempt set, returning empty player report");
        return PlayerReport::empty();
    }
    tracing::debug!(records = attempts.len(), "building player report");
    PlayerReport {
        most_lost_levels: most_lost_levels(attempts),
        max_points_ratio: max_points_ratio(attempts),
        attempts_per_game: attempts_per_game(attempts),
        attempts_per_level: attempts_per_level(attempts),
        time_stats: time_stats(attempts),
    }
}

/// Level(s) with the most failed attempts. Ties all make the list, in
/// first-seen order. A set with no losses yields an empty list and count 0.
pub fn most_lost_levels(attempts: &[Attempt]) -> Option<MostLostLevels> {
    if attempts.is_empty() {
        return None;
    }

    let mut losses: Vec<(String, u64)> = Vec::new();
    for attempt in attempts.iter().filter(|a| !a.is_success()) {
        let Some(level) = &attempt.level_id else {
            continue;
        };
        match losses.iter_mut().find(|(l, _)| l == level) {
            Some((_, n)) => *n += 1,
            None => losses.push((level.clone(), 1)),
        }
    }

    let count = losses.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let levels = losses
        .into_iter()
        .filter(|(_, n)| *n == count)
        .map(|(l, _)| l)
        .collect();
    Some(MostLostLevels { levels, count })
}

/// Share of perfect wins among wins, rounded to a whole percent.
pub fn max_points_ratio(attempts: &[Attempt]) -> Option<MaxPointsRatio> {
    if attempts.is_empty() {
        return None;
    }

    let total = attempts.iter().filter(|a| a.is_success()).count() as u64;
    let perfect = attempts.iter().filter(|a| a.is_perfect()).count() as u64;
    let percentage = if total > 0 {
        (perfect as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    Some(MaxPointsRatio { percentage, total, perfect })
}

/// Attempt counts per game, first-seen order. Records without a game id are
/// skipped.
pub fn attempts_per_game(attempts: &[Attempt]) -> Option<Vec<GameAttempts>> {
    if attempts.is_empty() {
        return None;
    }

    let mut games: Vec<GameAttempts> = Vec::new();
    for attempt in attempts {
        let Some(game) = &attempt.game_id else {
            continue;
        };
        match games.iter_mut().find(|g| g.game == *game) {
            Some(g) => g.attempts += 1,
            None => games.push(GameAttempts { game: game.clone(), attempts: 1 }),
        }
    }
    Some(games)
}

/// Fixed buckets for level numbers 1–5, all five always present. `percent`
/// is a fraction of the bucketed total, not of the whole set; attempts with
/// a level number outside 1–5 (or none) are not counted anywhere here.
pub fn attempts_per_level(attempts: &[Attempt]) -> Option<Vec<LevelBucket>> {
    if attempts.is_empty() {
        return None;
    }

    let mut counts = [0u64; 5];
    for attempt in attempts {
        if let Some(n @ 1..=5) = attempt.level_number {
            counts[(n - 1) as usize] += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    let buckets = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| LevelBucket {
            level: i as u32 + 1,
            count,
            percent: if total > 0 {
                round3(count as f64 / total as f64)
            } else {
                0.0
            },
        })
        .collect();
    Some(buckets)
}

/// Total clamped play time plus the single longest attempt. The maximum is
/// tracked per attempt, not per level; on equal durations the earlier
/// attempt keeps the title.
pub fn time_stats(attempts: &[Attempt]) -> Option<TimeStats> {
    let first = attempts.first()?;

    let mut total_secs = 0u64;
    let mut longest_level = first.level_id.clone();
    let mut longest_secs = first.duration_secs;
    for attempt in attempts {
        total_secs += attempt.duration_secs;
        if attempt.duration_secs > longest_secs {
            longest_secs = attempt.duration_secs;
            longest_level = attempt.level_id.clone();
        }
    }

    Some(TimeStats {
        total_secs,
        longest_level,
        longest_level_secs: longest_secs,
    })
}
