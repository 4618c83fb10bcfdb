#![no_main]

use anubis_elo::{
    Backtest, CanonicalNames, IdRange, MatchRecord, PlayerId, RatingSystem, WeightMode,
};
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryMatch {
    match_id: i64,
    team_a: [u8; 5],
    team_b: [u8; 5],
    team_a_rounds: u32,
    team_b_rounds: u32,
}

impl ArbitraryMatch {
    fn into_record(self) -> MatchRecord {
        let ids = |team: [u8; 5]| team.map(|id| PlayerId(u64::from(id))).to_vec();
        let names = |team: [u8; 5]| team.map(|id| format!("player{id}")).to_vec();
        MatchRecord {
            match_id: self.match_id,
            map_name: "anubis".to_owned(),
            team_a_rounds: self.team_a_rounds,
            team_b_rounds: self.team_b_rounds,
            team_a_ids: ids(self.team_a),
            team_b_ids: ids(self.team_b),
            team_a_names: names(self.team_a),
            team_b_names: names(self.team_b),
            ..Default::default()
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Scenario {
    k: u8,
    weight_mode: u8,
    weight_cap: u8,
    matches: Vec<ArbitraryMatch>,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(scenario) = Scenario::arbitrary(&mut u) else {
        return;
    };

    let rating_system = RatingSystem::builder()
        .k(f64::from(scenario.k))
        .weight_mode(match scenario.weight_mode % 3 {
            0 => WeightMode::None,
            1 => WeightMode::Linear,
            _ => WeightMode::Sqrt,
        })
        .weight_cap(1.0 + f64::from(scenario.weight_cap) / 16.0)
        .build();

    let records: Vec<MatchRecord> = scenario
        .matches
        .into_iter()
        .map(ArbitraryMatch::into_record)
        .collect();

    let mut backtest = Backtest::new(
        rating_system,
        "anubis",
        IdRange::UNBOUNDED,
        CanonicalNames::build(&records, "anubis"),
    );

    for record in &records {
        let before: f64 = backtest
            .leaderboard()
            .entries()
            .iter()
            .map(|entry| f64::from(entry.rating))
            .sum();
        let newcomers = record
            .team_a_ids
            .iter()
            .chain(&record.team_b_ids)
            .filter(|&&id| backtest.leaderboard().get(id).is_none())
            .count();

        let Ok(update) = backtest.encounter(record) else {
            continue;
        };

        assert!((0.0..=1.0).contains(&update.expected.value()));
        assert!(update.weight >= 1.0 && update.weight <= backtest.rating_system().weight_cap());
        assert!(f64::from(update.delta).is_finite());

        let after: f64 = backtest
            .leaderboard()
            .entries()
            .iter()
            .map(|entry| f64::from(entry.rating))
            .sum();
        let expected_total = before + newcomers as f64 * backtest.rating_system().default_rating();
        assert!((after - expected_total).abs() < 1e-6 * (1.0 + expected_total.abs()));
    }

    let metrics = backtest.metrics();
    assert!((0.0..=1.0).contains(&metrics.accuracy));
    assert!(metrics.log_loss.is_finite() && metrics.log_loss >= 0.0);
});
