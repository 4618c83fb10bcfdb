use std::{convert::Infallible, io, str::FromStr};

use anubis_elo::{MatchRecord, PlayerId};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;
use tracing::{debug, info};

/// Columns that must be present in the header, each with the names it is
/// accepted under.
const REQUIRED_COLUMNS: &[&[&str]] = &[
    &["match_id", "mapstats_id"],
    &["map_name"],
    &["team_a_name", "team1_name"],
    &["team_b_name", "team2_name"],
    &["team_a_rounds", "team1_rounds"],
    &["team_b_rounds", "team2_rounds"],
    &["team_a_ids", "team1_player_ids"],
    &["team_b_ids", "team2_player_ids"],
    &["team_a_names", "team1_player_names"],
    &["team_b_names", "team2_player_names"],
    &["source_reference", "source_path"],
];

#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawMatchRecord {
    #[serde(alias = "mapstats_id")]
    pub match_id: i64,
    #[serde(default)]
    pub event_name: String,
    pub map_name: String,
    #[serde(alias = "team1_name")]
    pub team_a_name: String,
    #[serde(alias = "team2_name")]
    pub team_b_name: String,
    #[serde(alias = "team1_rounds")]
    pub team_a_rounds: u32,
    #[serde(alias = "team2_rounds")]
    pub team_b_rounds: u32,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(alias = "team1_player_ids")]
    pub team_a_ids: IdList,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(alias = "team2_player_ids")]
    pub team_b_ids: IdList,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(alias = "team1_player_names")]
    pub team_a_names: NameList,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(alias = "team2_player_names")]
    pub team_b_names: NameList,
    #[serde(alias = "source_path")]
    pub source_reference: String,
}

impl From<RawMatchRecord> for MatchRecord {
    fn from(raw: RawMatchRecord) -> MatchRecord {
        MatchRecord {
            match_id: raw.match_id,
            event_name: raw.event_name,
            map_name: raw.map_name,
            team_a_name: raw.team_a_name,
            team_b_name: raw.team_b_name,
            team_a_rounds: raw.team_a_rounds,
            team_b_rounds: raw.team_b_rounds,
            team_a_ids: raw.team_a_ids.0,
            team_b_ids: raw.team_b_ids.0,
            team_a_names: raw.team_a_names.0,
            team_b_names: raw.team_b_names.0,
            source_reference: raw.source_reference,
        }
    }
}

/// Comma-separated player ids, as in `"7998,11893,9216"`. Empty parts are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(pub Vec<PlayerId>);

#[derive(Debug, Error)]
#[error("invalid player id list")]
pub struct InvalidIdList;

impl FromStr for IdList {
    type Err = InvalidIdList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().map_err(|_| InvalidIdList))
            .collect::<Result<Vec<PlayerId>, _>>()
            .map(IdList)
    }
}

/// Comma-separated display names. Names are trimmed and empty parts are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList(pub Vec<String>);

impl FromStr for NameList {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NameList(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
        ))
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("column {0} is present under more than one name")]
    DuplicateColumn(&'static str),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub records: Vec<MatchRecord>,
    /// Rows that could not be parsed and were left out.
    pub dropped_rows: u64,
}

/// Reads match records from CSV with a header row.
///
/// A missing required column, or one given under both of its names, fails
/// before any row is read. Rows with malformed fields are dropped and
/// counted.
pub fn read_records<R: io::Read>(reader: R) -> Result<ReadOutcome, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    check_schema(reader.headers()?)?;

    let mut outcome = ReadOutcome::default();
    for (row, result) in reader.deserialize::<RawMatchRecord>().enumerate() {
        match result {
            Ok(raw) => outcome.records.push(MatchRecord::from(raw)),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                debug!(row = row + 1, %err, "dropping row");
                outcome.dropped_rows += 1;
            }
        }
    }

    info!(
        records = outcome.records.len(),
        dropped_rows = outcome.dropped_rows,
        "read match records"
    );
    Ok(outcome)
}

fn check_schema(headers: &csv::StringRecord) -> Result<(), ReadError> {
    for &accepted in REQUIRED_COLUMNS {
        let present = headers
            .iter()
            .filter(|header| accepted.contains(header))
            .count();
        match present {
            0 => return Err(ReadError::MissingColumn(accepted[0])),
            1 => (),
            _ => return Err(ReadError::DuplicateColumn(accepted[0])),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "match_id,event_name,map_name,team_a_name,team_b_name,team_a_rounds,team_b_rounds,team_a_ids,team_b_ids,team_a_names,team_b_names,source_reference\n";

    fn ids(raw: &[u64]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId).collect()
    }

    #[test]
    fn test_read_records() {
        let data = format!(
            "{HEADER}\
             42,Major,Anubis,Vitality,Spirit,13,7,\"1,2,3,4,5\",\"6,7,8,9,10\",\" apEX , ZywOo,flameZ,mezii,Spinx\",\"a,b,c,d,e\",42.html\n"
        );
        let outcome = read_records(data.as_bytes()).expect("valid csv");
        assert_eq!(outcome.dropped_rows, 0);
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.match_id, 42);
        assert_eq!(record.event_name, "Major");
        assert_eq!(record.map_name, "Anubis");
        assert_eq!((record.team_a_rounds, record.team_b_rounds), (13, 7));
        assert_eq!(record.team_a_ids, ids(&[1, 2, 3, 4, 5]));
        assert_eq!(record.team_b_ids, ids(&[6, 7, 8, 9, 10]));
        assert_eq!(
            record.team_a_names,
            ["apEX", "ZywOo", "flameZ", "mezii", "Spinx"]
        );
        assert_eq!(record.source_reference, "42.html");
    }

    #[test]
    fn test_dataset_builder_columns() {
        let data = "mapstats_id,event_name,map_name,team1_name,team2_name,team1_rounds,team2_rounds,team1_player_ids,team2_player_ids,player_ids_10,team1_player_names,team2_player_names,player_names_10,source_path\n\
                    7,,anubis,A,B,16,14,\"1,2,3,4,5\",\"6,7,8,9,10\",\"1,2,3,4,5,6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\"a,b,c,d,e,f,g,h,i,j\",raw/7.html\n";
        let outcome = read_records(data.as_bytes()).expect("valid csv");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].match_id, 7);
        assert_eq!(outcome.records[0].team_b_ids, ids(&[6, 7, 8, 9, 10]));
        assert_eq!(outcome.records[0].source_reference, "raw/7.html");
    }

    #[test]
    fn test_missing_column() {
        let data = "match_id,map_name,team_a_name,team_b_name,team_a_rounds,team_b_rounds,team_a_ids,team_a_names,team_b_names,source_reference\n";
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(ReadError::MissingColumn("team_b_ids"))
        ));
        assert!(matches!(
            read_records(&b""[..]),
            Err(ReadError::MissingColumn("match_id"))
        ));
    }

    #[test]
    fn test_column_under_both_names() {
        let data = "match_id,mapstats_id,map_name,team_a_name,team_b_name,team_a_rounds,team_b_rounds,team_a_ids,team_b_ids,team_a_names,team_b_names,source_reference\n\
                    1,1,anubis,A,B,16,4,\"1,2,3,4,5\",\"6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\n";
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(ReadError::DuplicateColumn("match_id"))
        ));

        let data = HEADER.replace("source_reference", "source_reference,source_path");
        assert!(matches!(
            read_records(data.as_bytes()),
            Err(ReadError::DuplicateColumn("source_reference"))
        ));
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let data = format!(
            "{HEADER}\
             1,,anubis,A,B,16,4,\"1,2,3,4,5\",\"6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\n\
             x,,anubis,A,B,16,4,\"1,2,3,4,5\",\"6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\n\
             3,,anubis,A,B,-1,4,\"1,2,3,4,5\",\"6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\n\
             4,,anubis,A,B,16,4,\"1,2,x,4,5\",\"6,7,8,9,10\",\"a,b,c,d,e\",\"f,g,h,i,j\",\n\
             5,,anubis,A,B,16,4,\"1,2,3,4\",\"6,7,8,9,10\",\"a,b,c,d\",\"f,g,h,i,j\",\n"
        );
        let outcome = read_records(data.as_bytes()).expect("valid csv");
        assert_eq!(outcome.dropped_rows, 3);
        let kept: Vec<i64> = outcome.records.iter().map(|r| r.match_id).collect();
        assert_eq!(kept, [1, 5]);
    }

    #[test]
    fn test_lists() {
        assert_eq!("".parse::<IdList>().ok(), Some(IdList(Vec::new())));
        assert_eq!(
            " 1, 2,,3 ".parse::<IdList>().ok(),
            Some(IdList(ids(&[1, 2, 3])))
        );
        assert!("1,-2".parse::<IdList>().is_err());
        assert_eq!(
            "a, ,b ,".parse::<NameList>(),
            Ok(NameList(vec!["a".to_owned(), "b".to_owned()]))
        );
    }
}
