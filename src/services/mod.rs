pub mod format;
pub mod game_stats;
pub mod player_stats;
