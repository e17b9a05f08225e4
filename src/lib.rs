//! Analytics aggregation engine for minigame attempt records.
//!
//! Turns raw gameplay attempt rows into two report shapes: a per-player
//! diagnostic report and a per-game operational report. The engine is pure
//! in-memory batch math: records are normalized, optionally filtered by
//! player/window/game, and handed to independent calculators whose outputs
//! an assembler composes into a value-object report. Fetching the records,
//! rendering the reports, and exporting them to files are the surrounding
//! application's job; the reports serialize with the field names that
//! application expects.
//!
//! ```
//! use minigame_analytics::{build_game_report, normalize, GameContext, Window};
//!
//! let attempts = normalize(vec![]);
//! let ctx = GameContext { window: Window::unbounded(), total_rounds: 0 };
//! let report = build_game_report(&attempts, &ctx);
//! assert!(report.core_kpi.is_none());
//! ```

pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod services;

pub use error::{AnalyticsError, AnalyticsResult};
pub use filter::{AttemptFilter, Window, ALL_GAMES};
pub use models::attempt::AttemptRecord;
pub use models::game_report::GameReport;
pub use models::player_report::PlayerReport;
pub use normalize::{normalize, Attempt};
pub use services::format::PlayTime;
pub use services::game_stats::{build_game_report, GameContext};
pub use services::player_stats::build_player_report;
