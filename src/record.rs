use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;

/// Number of players on each side of a valid match.
pub const TEAM_SIZE: usize = 5;

/// Stable identifier of a competitor, as assigned by the data source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PlayerId)
    }
}

/// One observed team-vs-team map result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    /// Chronological key. Need not be contiguous.
    pub match_id: i64,
    pub event_name: String,
    pub map_name: String,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_rounds: u32,
    pub team_b_rounds: u32,
    pub team_a_ids: Vec<PlayerId>,
    pub team_b_ids: Vec<PlayerId>,
    /// Display names aligned with `team_a_ids`.
    pub team_a_names: Vec<String>,
    /// Display names aligned with `team_b_ids`.
    pub team_b_names: Vec<String>,
    pub source_reference: String,
}

impl MatchRecord {
    /// Case-insensitive comparison against an already lowercased map name.
    pub fn is_on_map(&self, lowercase_map: &str) -> bool {
        self.map_name.to_lowercase() == lowercase_map
    }

    pub fn validate_teams(&self) -> Result<(), TeamShapeError> {
        validate_team_pair(
            &self.team_a_ids,
            &self.team_b_ids,
            &self.team_a_names,
            &self.team_b_names,
        )
    }

    /// Both sides as `(ids, names)` pairs, first team first.
    pub fn sides(&self) -> [(&[PlayerId], &[String]); 2] {
        [
            (self.team_a_ids.as_slice(), self.team_a_names.as_slice()),
            (self.team_b_ids.as_slice(), self.team_b_names.as_slice()),
        ]
    }
}

/// Reason a record cannot take part in the replay.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum TeamShapeError {
    #[error("expected {} players per team, got {team_a} and {team_b}", TEAM_SIZE)]
    WrongTeamSize { team_a: usize, team_b: usize },
    #[error("expected {} names per team, got {team_a} and {team_b}", TEAM_SIZE)]
    WrongNameCount { team_a: usize, team_b: usize },
    #[error("player {0} listed twice on the same team")]
    DuplicatePlayer(PlayerId),
    #[error("player {0} listed on both teams")]
    PlayerOnBothTeams(PlayerId),
}

/// Checks that both teams have exactly five distinct players, five names,
/// and no player in common.
pub fn validate_team_pair(
    ids_a: &[PlayerId],
    ids_b: &[PlayerId],
    names_a: &[String],
    names_b: &[String],
) -> Result<(), TeamShapeError> {
    if ids_a.len() != TEAM_SIZE || ids_b.len() != TEAM_SIZE {
        return Err(TeamShapeError::WrongTeamSize {
            team_a: ids_a.len(),
            team_b: ids_b.len(),
        });
    }
    if names_a.len() != TEAM_SIZE || names_b.len() != TEAM_SIZE {
        return Err(TeamShapeError::WrongNameCount {
            team_a: names_a.len(),
            team_b: names_b.len(),
        });
    }

    let mut seen_a = FxHashSet::default();
    for &id in ids_a {
        if !seen_a.insert(id) {
            return Err(TeamShapeError::DuplicatePlayer(id));
        }
    }

    let mut seen_b = FxHashSet::default();
    for &id in ids_b {
        if !seen_b.insert(id) {
            return Err(TeamShapeError::DuplicatePlayer(id));
        }
    }

    match ids_b.iter().find(|id| seen_a.contains(*id)) {
        Some(&id) => Err(TeamShapeError::PlayerOnBothTeams(id)),
        None => Ok(()),
    }
}

pub fn is_valid_team_pair(
    ids_a: &[PlayerId],
    ids_b: &[PlayerId],
    names_a: &[String],
    names_b: &[String],
) -> bool {
    validate_team_pair(ids_a, ids_b, names_a, names_b).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId).collect()
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn test_valid_pair() {
        assert!(is_valid_team_pair(
            &ids(&[1, 2, 3, 4, 5]),
            &ids(&[6, 7, 8, 9, 10]),
            &names(5),
            &names(5),
        ));
    }

    #[test]
    fn test_short_team() {
        assert_eq!(
            validate_team_pair(
                &ids(&[1, 2, 3, 4]),
                &ids(&[6, 7, 8, 9, 10]),
                &names(4),
                &names(5),
            ),
            Err(TeamShapeError::WrongTeamSize {
                team_a: 4,
                team_b: 5
            })
        );
    }

    #[test]
    fn test_missing_names() {
        assert_eq!(
            validate_team_pair(
                &ids(&[1, 2, 3, 4, 5]),
                &ids(&[6, 7, 8, 9, 10]),
                &names(5),
                &names(3),
            ),
            Err(TeamShapeError::WrongNameCount {
                team_a: 5,
                team_b: 3
            })
        );
    }

    #[test]
    fn test_duplicate_player() {
        assert_eq!(
            validate_team_pair(
                &ids(&[1, 2, 3, 4, 5]),
                &ids(&[6, 7, 7, 9, 10]),
                &names(5),
                &names(5),
            ),
            Err(TeamShapeError::DuplicatePlayer(PlayerId(7)))
        );
    }

    #[test]
    fn test_player_on_both_teams() {
        assert_eq!(
            validate_team_pair(
                &ids(&[1, 2, 3, 4, 5]),
                &ids(&[6, 7, 8, 9, 1]),
                &names(5),
                &names(5),
            ),
            Err(TeamShapeError::PlayerOnBothTeams(PlayerId(1)))
        );
    }

    #[test]
    fn test_is_on_map() {
        let record = MatchRecord {
            map_name: "Anubis".to_owned(),
            ..Default::default()
        };
        assert!(record.is_on_map("anubis"));
        assert!(!record.is_on_map("mirage"));
    }
}
