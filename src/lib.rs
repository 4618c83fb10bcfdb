//! Elo-style ratings for individual players, estimated from five-versus-five
//! team results on a single map, with a chronological backtest.
//!
//! Matches are replayed in ascending `match_id` order. Each match is scored
//! against the prediction made from ratings *before* the match, so
//! [`RunMetrics`] measure genuinely out-of-sample accuracy and log-loss.
//!
//! ```
//! use anubis_elo::{Backtest, CanonicalNames, IdRange, MatchRecord, PlayerId, RatingSystem};
//!
//! let record = MatchRecord {
//!     match_id: 1,
//!     map_name: "Anubis".to_owned(),
//!     team_a_rounds: 16,
//!     team_b_rounds: 4,
//!     team_a_ids: (1..=5).map(PlayerId).collect(),
//!     team_b_ids: (6..=10).map(PlayerId).collect(),
//!     team_a_names: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
//!     team_b_names: ["f", "g", "h", "i", "j"].map(String::from).to_vec(),
//!     ..Default::default()
//! };
//!
//! let records = [record];
//! let names = CanonicalNames::build(&records, "anubis");
//! let report = Backtest::new(RatingSystem::new(), "anubis", IdRange::UNBOUNDED, names)
//!     .replay(&records);
//!
//! assert_eq!(report.metrics.matches_used, 1);
//! assert_eq!(report.ratings[0].rating, 1524.0);
//! assert_eq!(report.ratings[9].rating, 1476.0);
//! ```

#![forbid(unsafe_code)]

mod backtest;
mod canonical;
mod leaderboard;
mod metrics;
mod rating;
mod rating_system;
mod record;
mod score;
mod weight;

pub use backtest::{
    Backtest, BacktestReport, IdRange, MatchUpdate, RatingRow, SkipCounts, DEFAULT_MAP,
};
pub use canonical::CanonicalNames;
pub use leaderboard::{CompetitorRating, Leaderboard};
pub use metrics::{
    is_correct_prediction, log_loss, MetricsAccumulator, RunMetrics, LOG_LOSS_EPSILON,
};
pub use rating::{RatingDifference, RatingScalar};
pub use rating_system::{RatingSystem, RatingSystemBuilder, LOGISTIC_SCALE};
pub use record::{
    is_valid_team_pair, validate_team_pair, MatchRecord, PlayerId, TeamShapeError, TEAM_SIZE,
};
pub use score::Score;
pub use weight::{InvalidWeightMode, WeightMode, ROUND_MARGIN_SCALE};
