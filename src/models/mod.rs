pub mod attempt;
pub mod game_report;
pub mod player_report;
