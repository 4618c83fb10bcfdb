use tracing::{debug, info};

use crate::{
    CanonicalNames, Leaderboard, MatchRecord, MetricsAccumulator, PlayerId, RatingDifference,
    RatingScalar, RatingSystem, RunMetrics, Score, TeamShapeError,
};

/// Map considered when no other map is configured.
pub const DEFAULT_MAP: &str = "anubis";

/// Inclusive bounds on `match_id`. `None` means unbounded.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct IdRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl IdRange {
    pub const UNBOUNDED: IdRange = IdRange {
        start: None,
        end: None,
    };

    pub fn contains(&self, match_id: i64) -> bool {
        self.start.map_or(true, |start| start <= match_id)
            && self.end.map_or(true, |end| match_id <= end)
    }
}

/// Records that did not take part in the replay, by reason.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub off_map: u64,
    pub out_of_range: u64,
    pub invalid_teams: u64,
}

impl SkipCounts {
    pub fn total(&self) -> u64 {
        self.off_map + self.out_of_range + self.invalid_teams
    }
}

/// Everything that happened to the ratings in a single match.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatchUpdate {
    /// Expected score of the first team, from ratings before the match.
    pub expected: Score,
    pub actual: Score,
    pub weight: f64,
    /// Applied to every member of the first team. Every member of the second
    /// team received exactly the negation.
    pub delta: RatingDifference,
}

/// One row of the final ratings table.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub id: PlayerId,
    pub display_name: String,
    pub rating: f64,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    pub metrics: RunMetrics,
    pub skipped: SkipCounts,
    /// Every competitor that took part in at least one match, by descending
    /// rating.
    pub ratings: Vec<RatingRow>,
}

/// Chronological replay of match records, predicting each outcome before
/// updating on it.
///
/// The replay is a sequential fold: each match reads ratings written by all
/// earlier matches.
#[derive(Debug, Clone)]
pub struct Backtest {
    rating_system: RatingSystem,
    map: String,
    range: IdRange,
    names: CanonicalNames,
    leaderboard: Leaderboard,
    metrics: MetricsAccumulator,
    skipped: SkipCounts,
}

impl Backtest {
    pub fn new(
        rating_system: RatingSystem,
        map: &str,
        range: IdRange,
        names: CanonicalNames,
    ) -> Backtest {
        Backtest {
            rating_system,
            map: map.to_lowercase(),
            range,
            names,
            leaderboard: Leaderboard::default(),
            metrics: MetricsAccumulator::default(),
            skipped: SkipCounts::default(),
        }
    }

    pub fn rating_system(&self) -> &RatingSystem {
        &self.rating_system
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn names(&self) -> &CanonicalNames {
        &self.names
    }

    /// Replays all records on the configured map and in the configured
    /// range, in ascending `match_id` order regardless of input order.
    pub fn replay(mut self, records: &[MatchRecord]) -> BacktestReport {
        for record in self.select(records) {
            if let Err(err) = self.encounter(record) {
                debug!(match_id = record.match_id, %err, "skipping match");
                self.skipped.invalid_teams += 1;
            }
        }

        let report = self.finish();
        info!(
            matches_used = report.metrics.matches_used,
            skipped = report.skipped.total(),
            off_map = report.skipped.off_map,
            out_of_range = report.skipped.out_of_range,
            invalid_teams = report.skipped.invalid_teams,
            competitors = report.ratings.len(),
            "replay finished"
        );
        report
    }

    /// Records on the configured map and in range, stably sorted by
    /// `match_id`.
    fn select<'a>(&mut self, records: &'a [MatchRecord]) -> Vec<&'a MatchRecord> {
        let mut selected = Vec::with_capacity(records.len());
        for record in records {
            if !record.is_on_map(&self.map) {
                self.skipped.off_map += 1;
            } else if !self.range.contains(record.match_id) {
                self.skipped.out_of_range += 1;
            } else {
                selected.push(record);
            }
        }
        selected.sort_by_key(|record| record.match_id);
        selected
    }

    /// Scores and applies a single match. Records with an invalid team
    /// shape leave all state untouched.
    pub fn encounter(&mut self, record: &MatchRecord) -> Result<MatchUpdate, TeamShapeError> {
        record.validate_teams()?;

        for (ids, names) in record.sides() {
            for (&id, name) in ids.iter().zip(names) {
                self.names.learn(id, name);
            }
        }

        let team_a = self.team_rating(&record.team_a_ids);
        let team_b = self.team_rating(&record.team_b_ids);

        let expected = self.rating_system.expected_score(team_a, team_b);
        let actual = Score::from_rounds(record.team_a_rounds, record.team_b_rounds);
        let weight = self
            .rating_system
            .round_weight(record.team_a_rounds, record.team_b_rounds);

        self.metrics.add(expected, actual);

        let delta = self.rating_system.rating_delta(expected, actual, weight);
        self.apply(&record.team_a_ids, delta, actual);
        self.apply(&record.team_b_ids, -delta, actual.opposite());

        Ok(MatchUpdate {
            expected,
            actual,
            weight,
            delta,
        })
    }

    fn team_rating(&self, ids: &[PlayerId]) -> RatingScalar {
        let default = self.rating_system.new_rating();
        RatingScalar::mean(ids.iter().map(|&id| self.leaderboard.rating_or(id, default)))
            .unwrap_or(default)
    }

    fn apply(&mut self, ids: &[PlayerId], delta: RatingDifference, score: Score) {
        let default = self.rating_system.new_rating();
        for &id in ids {
            let entry = self.leaderboard.get_mut_or_insert_with(id, || default);
            entry.rating += delta;
            entry.record_game(score);
        }
    }

    pub fn metrics(&self) -> RunMetrics {
        self.metrics.finish()
    }

    pub fn finish(&self) -> BacktestReport {
        BacktestReport {
            metrics: self.metrics.finish(),
            skipped: self.skipped,
            ratings: self
                .leaderboard
                .ranked()
                .into_iter()
                .map(|entry| RatingRow {
                    id: entry.id,
                    display_name: self.names.display_name(entry.id).into_owned(),
                    rating: f64::from(entry.rating),
                    games: entry.games,
                    wins: entry.wins,
                    losses: entry.losses,
                })
                .collect(),
        }
    }
}
