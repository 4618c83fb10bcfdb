use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{PlayerId, RatingScalar, Score};

/// Mutable state of one competitor during a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRating {
    pub id: PlayerId,
    pub rating: RatingScalar,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

impl CompetitorRating {
    pub fn new(id: PlayerId, rating: RatingScalar) -> CompetitorRating {
        CompetitorRating {
            id,
            rating,
            games: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Counts a game with the given score from this competitor's point of
    /// view. Draws count towards neither wins nor losses.
    pub fn record_game(&mut self, score: Score) {
        self.games += 1;
        if score.is_win() {
            self.wins += 1;
        } else if score.is_loss() {
            self.losses += 1;
        }
    }
}

/// Ratings of all competitors seen so far, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    index: FxHashMap<PlayerId, usize>,
    entries: Vec<CompetitorRating>,
}

impl Leaderboard {
    pub fn get(&self, id: PlayerId) -> Option<&CompetitorRating> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    /// Current rating, or `default` for a competitor that has not been seen
    /// yet.
    pub fn rating_or(&self, id: PlayerId, default: RatingScalar) -> RatingScalar {
        self.get(id).map_or(default, |entry| entry.rating)
    }

    pub fn get_mut_or_insert_with<F>(&mut self, id: PlayerId, f: F) -> &mut CompetitorRating
    where
        F: FnOnce() -> RatingScalar,
    {
        let entries = &mut self.entries;
        let i = *self.index.entry(id).or_insert_with(|| {
            entries.push(CompetitorRating::new(id, f()));
            entries.len() - 1
        });
        &mut self.entries[i]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order of first appearance.
    pub fn entries(&self) -> &[CompetitorRating] {
        &self.entries
    }

    /// Entries sorted by descending rating. Equal ratings keep their order
    /// of first appearance.
    pub fn ranked(&self) -> Vec<&CompetitorRating> {
        let mut ranked: Vec<&CompetitorRating> = self.entries.iter().collect();
        ranked.sort_by_key(|entry| Reverse(OrderedFloat(f64::from(entry.rating))));
        ranked
    }
}
