use crate::{RatingDifference, RatingScalar, Score, WeightMode};

/// Rating difference at which the stronger side is expected to score 10
/// times as much as the weaker side.
pub const LOGISTIC_SCALE: f64 = 400.0;

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    k: f64,
    default_rating: f64,
    weight_mode: WeightMode,
    weight_cap: f64,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            k: 24.0,
            default_rating: 1500.0,
            weight_mode: WeightMode::Linear,
            weight_cap: 2.0,
        }
    }

    /// Learning rate. Maximum change of a team's rating for a match with
    /// weight `1`.
    pub fn k(&mut self, k: f64) -> &mut Self {
        assert!(k.is_finite() && k >= 0.0);
        self.k = k;
        self
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    pub fn weight_mode(&mut self, weight_mode: WeightMode) -> &mut Self {
        self.weight_mode = weight_mode;
        self
    }

    pub fn weight_cap(&mut self, weight_cap: f64) -> &mut Self {
        assert!(weight_cap.is_finite() && weight_cap >= 1.0);
        self.weight_cap = weight_cap;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            k: self.k,
            default_rating: self.default_rating,
            weight_mode: self.weight_mode,
            weight_cap: self.weight_cap,
        }
    }
}

/// Elo-style paired comparison between two teams, with updates scaled by
/// the round margin.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    k: f64,
    default_rating: f64,
    weight_mode: WeightMode,
    weight_cap: f64,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn new_rating(&self) -> RatingScalar {
        RatingScalar::from(self.default_rating)
    }

    pub fn weight_mode(&self) -> WeightMode {
        self.weight_mode
    }

    pub fn weight_cap(&self) -> f64 {
        self.weight_cap
    }

    /// Expected score of the first team against the second team.
    ///
    /// The expected score of the second team is exactly
    /// [`Score::opposite()`].
    pub fn expected_score(&self, first: RatingScalar, second: RatingScalar) -> Score {
        let RatingDifference(gap) = second - first;
        Score(1.0 / (1.0 + 10f64.powf(gap / LOGISTIC_SCALE)))
    }

    /// Weight of a match given the rounds won by each side.
    pub fn round_weight(&self, first_rounds: u32, second_rounds: u32) -> f64 {
        self.weight_mode
            .weight(first_rounds.abs_diff(second_rounds), self.weight_cap)
    }

    /// Change applied to every member of the first team. Every member of the
    /// second team receives the negation.
    pub fn rating_delta(&self, expected: Score, actual: Score, weight: f64) -> RatingDifference {
        RatingDifference::from(actual - expected) * (self.k * weight)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_equal_ratings() {
        let rating_system = RatingSystem::new();
        let expected = rating_system.expected_score(RatingScalar(1500.0), RatingScalar(1500.0));
        assert_eq!(expected, Score(0.5));
    }

    #[test]
    fn test_logistic_scale() {
        let rating_system = RatingSystem::new();
        let expected = rating_system.expected_score(RatingScalar(1900.0), RatingScalar(1500.0));
        assert!((f64::from(expected) - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_decisive_linear_win() {
        let rating_system = RatingSystem::new();
        let weight = rating_system.round_weight(16, 4);
        assert_eq!(weight, 2.0);
        let delta = rating_system.rating_delta(Score(0.5), Score::from_rounds(16, 4), weight);
        assert_eq!(delta, RatingDifference(24.0));
    }

    #[test]
    fn test_round_weight_is_symmetric() {
        let rating_system = RatingSystem::builder()
            .weight_mode(WeightMode::Sqrt)
            .weight_cap(5.0)
            .build();
        assert_eq!(
            rating_system.round_weight(13, 3),
            rating_system.round_weight(3, 13)
        );
    }

    #[test]
    #[should_panic]
    fn test_weight_cap_below_one() {
        RatingSystem::builder().weight_cap(0.5);
    }

    proptest! {
        #[test]
        fn expectation_is_complementary(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
            let rating_system = RatingSystem::new();
            let first = rating_system.expected_score(RatingScalar(a), RatingScalar(b));
            let second = rating_system.expected_score(RatingScalar(b), RatingScalar(a));
            prop_assert!((f64::from(first) + f64::from(second) - 1.0).abs() < 1e-12);
            prop_assert!((f64::from(first) + f64::from(first.opposite()) - 1.0).abs() < 1e-15);
        }

        #[test]
        fn expectation_is_monotonic(
            a in 0.0f64..3000.0,
            step in 1.0f64..500.0,
            b in 0.0f64..3000.0,
        ) {
            let rating_system = RatingSystem::new();
            let lower = rating_system.expected_score(RatingScalar(a), RatingScalar(b));
            let higher = rating_system.expected_score(RatingScalar(a + step), RatingScalar(b));
            prop_assert!(higher > lower);
        }
    }
}
