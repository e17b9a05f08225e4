//! Game-report calculators. Pure functions over the filtered attempt set;
//! the two scalars the set cannot provide (the query's own window and the
//! all-games attempt total) arrive in `GameContext` from the caller.

use std::collections::HashSet;

use crate::filter::Window;
use crate::models::game_report::{
    CoreKpi, GameReport, LevelAvgTime, LevelOutcome, LevelRetention, RegionPlayers,
};
use crate::normalize::Attempt;
use crate::services::format::{round1, round2, PlayTime};

/// Caller-supplied query scalars, deliberately not derived from the record
/// set: the window bounds the new-player count is judged against, and the
/// attempt total across all games behind `game_share`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameContext {
    pub window: Window,
    pub total_rounds: u64,
}

pub fn build_game_report(attempts: &[Attempt], ctx: &GameContext) -> GameReport {
    if attempts.is_empty() {
        tracing::debug!("empty attempt set, returning empty game report");
        return GameReport::empty();
    }
    tracing::debug!(
        records = attempts.len(),
        total_rounds = ctx.total_rounds,
        "building game report"
    );
    GameReport {
        core_kpi: core_kpi(attempts, ctx),
        top_regions: top_regions(attempts),
        levels_distribution: levels_distribution(attempts),
        players_retention: players_retention(attempts),
        avg_time_per_level: avg_time_per_level(attempts),
    }
}

pub fn core_kpi(attempts: &[Attempt], ctx: &GameContext) -> Option<CoreKpi> {
    if attempts.is_empty() {
        return None;
    }

    let total_attempts = attempts.len() as u64;
    let successful = attempts.iter().filter(|a| a.is_success()).count() as u64;
    let success_rate = round1(successful as f64 / total_attempts as f64 * 100.0);

    let unique_players: HashSet<&str> =
        attempts.iter().map(|a| a.player_id.as_str()).collect();

    // Registered inside the query's own window; an open bound does not
    // constrain. Players with no known registration date are never "new".
    let new_players = attempts
        .iter()
        .filter(|a| a.registration_date.is_some_and(|d| ctx.window.contains(d)))
        .map(|a| a.player_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    let total_play_secs: u64 = attempts.iter().map(|a| a.duration_secs).sum();
    let avg_secs =
        (total_play_secs as f64 / unique_players.len() as f64).round() as u64;

    let game_share = if ctx.total_rounds > 0 {
        round1(total_attempts as f64 / ctx.total_rounds as f64 * 100.0)
    } else {
        0.0
    };

    Some(CoreKpi {
        total_attempts,
        success_rate,
        unique_players: unique_players.len() as u64,
        new_players,
        avg_play_time_per_player: PlayTime::from_secs(avg_secs),
        game_share,
    })
}

/// Top five regions by distinct players, descending; equal counts keep
/// first-seen region order. Records without a region are skipped.
pub fn top_regions(attempts: &[Attempt]) -> Option<Vec<RegionPlayers>> {
    if attempts.is_empty() {
        return None;
    }

    let mut regions: Vec<(String, HashSet<&str>)> = Vec::new();
    for attempt in attempts {
        let Some(region) = &attempt.region else {
            continue;
        };
        match regions.iter_mut().find(|(r, _)| r == region) {
            Some((_, players)) => {
                players.insert(&attempt.player_id);
            }
            None => {
                regions.push((region.clone(), HashSet::from([attempt.player_id.as_str()])));
            }
        }
    }

    let mut rows: Vec<RegionPlayers> = regions
        .into_iter()
        .map(|(region, players)| RegionPlayers { region, count: players.len() as u64 })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    rows.sort_by_key(|r| std::cmp::Reverse(r.count));
    rows.truncate(5);
    Some(rows)
}

/// Attempt count and success rate per raw level id. No 1–5 bucketing here:
/// the game report keeps whatever level ids the data carries.
pub fn levels_distribution(attempts: &[Attempt]) -> Option<Vec<LevelOutcome>> {
    if attempts.is_empty() {
        return None;
    }

    let mut levels: Vec<(String, u64, u64)> = Vec::new();
    for attempt in attempts {
        let Some(level) = &attempt.level_id else {
            continue;
        };
        let idx = match levels.iter().position(|(l, _, _)| l == level) {
            Some(idx) => idx,
            None => {
                levels.push((level.clone(), 0, 0));
                levels.len() - 1
            }
        };
        levels[idx].1 += 1;
        if attempt.is_success() {
            levels[idx].2 += 1;
        }
    }

    let rows = levels
        .into_iter()
        .map(|(level, total, success)| LevelOutcome {
            level,
            total_attempts: total,
            success_rate: if total > 0 {
                round1(success as f64 / total as f64 * 100.0)
            } else {
                0.0
            },
        })
        .collect();
    Some(rows)
}

/// Distinct players per level against all distinct players in the set.
pub fn players_retention(attempts: &[Attempt]) -> Option<Vec<LevelRetention>> {
    if attempts.is_empty() {
        return None;
    }

    let all_players: HashSet<&str> =
        attempts.iter().map(|a| a.player_id.as_str()).collect();

    let mut levels: Vec<(String, HashSet<&str>)> = Vec::new();
    for attempt in attempts {
        let Some(level) = &attempt.level_id else {
            continue;
        };
        match levels.iter_mut().find(|(l, _)| l == level) {
            Some((_, players)) => {
                players.insert(&attempt.player_id);
            }
            None => {
                levels.push((level.clone(), HashSet::from([attempt.player_id.as_str()])));
            }
        }
    }

    let rows = levels
        .into_iter()
        .map(|(level, players)| LevelRetention {
            level,
            unique_players: players.len() as u64,
            share_percent: round1(players.len() as f64 / all_players.len() as f64 * 100.0),
        })
        .collect();
    Some(rows)
}

/// Average attempt duration per level, in minutes.
pub fn avg_time_per_level(attempts: &[Attempt]) -> Option<Vec<LevelAvgTime>> {
    if attempts.is_empty() {
        return None;
    }

    let mut levels: Vec<(String, u64, u64)> = Vec::new();
    for attempt in attempts {
        let Some(level) = &attempt.level_id else {
            continue;
        };
        match levels.iter_mut().find(|(l, _, _)| l == level) {
            Some((_, secs, count)) => {
                *secs += attempt.duration_secs;
                *count += 1;
            }
            None => levels.push((level.clone(), attempt.duration_secs, 1)),
        }
    }

    let rows = levels
        .into_iter()
        .map(|(level, secs, count)| LevelAvgTime {
            level,
            minutes: round2(secs as f64 / 60.0 / count as f64),
        })
        .collect();
    Some(rows)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::models::attempt::AttemptRecord;

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, h, m, 0).unwrap()
    }

    fn attempt(player: &str, level: &str, success: bool) -> Attempt {
        AttemptRecord {
            player_id: player.into(),
            level_id: Some(level.into()),
            game_id: Some("DIN".into()),
            start_time: Some(at(10, 12, 0)),
            end_time: Some(at(10, 12, 5)),
            result: Some(success),
            points: None,
            max_points: None,
            region: Some("EU".into()),
            registration_date: None,
        }
        .into()
    }

    fn in_region(player: &str, region: &str) -> Attempt {
        let mut a = attempt(player, "DIN-1", false);
        a.region = Some(region.into());
        a
    }

    fn ctx(total_rounds: u64) -> GameContext {
        GameContext { window: Window::unbounded(), total_rounds }
    }

    #[test]
    fn core_kpi_counts_and_rates() {
        let set = vec![
            attempt("P1", "DIN-1", true),
            attempt("P1", "DIN-2", false),
            attempt("P2", "DIN-1", false),
        ];
        let kpi = core_kpi(&set, &ctx(12)).unwrap();
        assert_eq!(kpi.total_attempts, 3);
        assert_eq!(kpi.success_rate, 33.3);
        assert_eq!(kpi.unique_players, 2);
        assert_eq!(kpi.game_share, 25.0);
        // 3 attempts x 300s over 2 players.
        assert_eq!(kpi.avg_play_time_per_player, PlayTime::from_secs(450));
    }

    #[test]
    fn game_share_with_zero_denominator_is_zero() {
        let set = vec![attempt("P1", "DIN-1", true)];
        assert_eq!(core_kpi(&set, &ctx(0)).unwrap().game_share, 0.0);
    }

    #[test]
    fn new_players_judged_against_caller_window() {
        let mut early = attempt("P1", "DIN-1", true);
        early.registration_date = Some(at(1, 0, 0));
        let mut inside = attempt("P2", "DIN-1", true);
        inside.registration_date = Some(at(9, 0, 0));
        let unknown = attempt("P3", "DIN-1", true);

        let window = Window::new(Some(at(5, 0, 0)), Some(at(15, 0, 0))).unwrap();
        let ctx = GameContext { window, total_rounds: 3 };
        let kpi = core_kpi(&[early, inside, unknown], &ctx).unwrap();
        assert_eq!(kpi.new_players, 1);
    }

    #[test]
    fn new_players_with_open_window_counts_all_registered() {
        let mut a = attempt("P1", "DIN-1", true);
        a.registration_date = Some(at(1, 0, 0));
        let b = attempt("P2", "DIN-1", true);
        let kpi = core_kpi(&[a, b], &ctx(2)).unwrap();
        assert_eq!(kpi.new_players, 1);
    }

    #[test]
    fn top_regions_ranks_by_distinct_players() {
        let set = vec![
            in_region("P1", "EU"),
            in_region("P2", "EU"),
            in_region("P3", "NA"),
            in_region("P4", "AS"),
            in_region("P5", "EU"),
        ];
        let out = top_regions(&set).unwrap();
        assert_eq!(out[0], RegionPlayers { region: "EU".into(), count: 3 });
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn top_regions_counts_players_once_and_caps_at_five() {
        let mut set = vec![
            in_region("P1", "EU"),
            in_region("P1", "EU"),
            in_region("P2", "NA"),
            in_region("P3", "AS"),
            in_region("P4", "SA"),
            in_region("P5", "AF"),
            in_region("P6", "OC"),
        ];
        set.push(in_region("P1", "EU"));
        let out = top_regions(&set).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].count, 1);
        // All tied at one player: first-seen region order decides.
        assert_eq!(out[0].region, "EU");
        assert_eq!(out[1].region, "NA");
    }

    #[test]
    fn levels_distribution_groups_by_raw_level_id() {
        let set = vec![
            attempt("P1", "DIN-1", true),
            attempt("P2", "DIN-1", false),
            attempt("P1", "DIN-7", true),
        ];
        let out = levels_distribution(&set).unwrap();
        assert_eq!(
            out,
            vec![
                LevelOutcome {
                    level: "DIN-1".into(),
                    total_attempts: 2,
                    success_rate: 50.0
                },
                // Unlike the player buckets, out-of-range levels stay.
                LevelOutcome {
                    level: "DIN-7".into(),
                    total_attempts: 1,
                    success_rate: 100.0
                },
            ]
        );
    }

    #[test]
    fn retention_shares_are_relative_to_all_players() {
        let set = vec![
            attempt("P1", "DIN-1", true),
            attempt("P2", "DIN-1", true),
            attempt("P2", "DIN-2", false),
        ];
        let out = players_retention(&set).unwrap();
        assert_eq!(
            out,
            vec![
                LevelRetention {
                    level: "DIN-1".into(),
                    unique_players: 2,
                    share_percent: 100.0
                },
                LevelRetention {
                    level: "DIN-2".into(),
                    unique_players: 1,
                    share_percent: 50.0
                },
            ]
        );
    }

    #[test]
    fn avg_time_per_level_in_minutes() {
        let mut long = attempt("P1", "DIN-1", true);
        long.duration_secs = 90;
        let mut short = attempt("P2", "DIN-1", true);
        short.duration_secs = 60;
        let out = avg_time_per_level(&[long, short]).unwrap();
        assert_eq!(out, vec![LevelAvgTime { level: "DIN-1".into(), minutes: 1.25 }]);
    }

    #[test]
    fn clamped_durations_feed_level_averages() {
        let backwards: Attempt = AttemptRecord {
            player_id: "P1".into(),
            level_id: Some("DIN-1".into()),
            game_id: Some("DIN".into()),
            start_time: Some(at(10, 12, 10)),
            end_time: Some(at(10, 12, 0)),
            result: None,
            points: None,
            max_points: None,
            region: None,
            registration_date: None,
        }
        .into();
        let out = avg_time_per_level(&[backwards]).unwrap();
        assert_eq!(out[0].minutes, 0.0);
    }

    #[test]
    fn empty_input_yields_all_none_fragments() {
        let report = build_game_report(&[], &ctx(10));
        assert!(report.core_kpi.is_none());
        assert!(report.top_regions.is_none());
        assert!(report.levels_distribution.is_none());
        assert!(report.players_retention.is_none());
        assert!(report.avg_time_per_level.is_none());
    }

    #[test]
    fn calculators_are_idempotent() {
        let set = vec![
            attempt("P1", "DIN-1", true),
            attempt("P2", "DIN-2", false),
            in_region("P3", "NA"),
        ];
        assert_eq!(core_kpi(&set, &ctx(5)), core_kpi(&set, &ctx(5)));
        assert_eq!(top_regions(&set), top_regions(&set));
        assert_eq!(levels_distribution(&set), levels_distribution(&set));
        assert_eq!(players_retention(&set), players_retention(&set));
        assert_eq!(avg_time_per_level(&set), avg_time_per_level(&set));
    }
}
