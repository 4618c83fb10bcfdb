use std::fmt;

use crate::Score;

/// Predictions are clamped to `[LOG_LOSS_EPSILON, 1 - LOG_LOSS_EPSILON]`
/// before taking logarithms.
pub const LOG_LOSS_EPSILON: f64 = 1e-12;

/// Binary cross-entropy between a predicted score and the actual score.
/// Lower is better.
pub fn log_loss(expected: Score, Score(actual): Score) -> f64 {
    let Score(expected) = expected.clamp(
        Score(LOG_LOSS_EPSILON),
        Score(1.0 - LOG_LOSS_EPSILON),
    );
    -(actual * expected.ln() + (1.0 - actual) * (1.0 - expected).ln())
}

/// Whether the favourite won. Even odds count as a prediction for the
/// first team. A draw is never a correct prediction.
pub fn is_correct_prediction(expected: Score, actual: Score) -> bool {
    (expected >= Score::DRAW && actual == Score::WIN)
        || (expected < Score::DRAW && actual == Score::LOSS)
}

/// Aggregate prediction quality over a replay.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RunMetrics {
    pub matches_used: u64,
    /// Fraction of correct predictions, `0.0` if no match was used.
    pub accuracy: f64,
    /// Mean log-loss, `0.0` if no match was used.
    pub log_loss: f64,
}

impl fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matches_used={} accuracy={:.4} log_loss={:.4}",
            self.matches_used, self.accuracy, self.log_loss
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    total_log_loss: f64,
    correct: u64,
    matches: u64,
}

impl MetricsAccumulator {
    /// Scores one prediction made before the ratings were updated on its
    /// outcome.
    pub fn add(&mut self, expected: Score, actual: Score) {
        self.total_log_loss += log_loss(expected, actual);
        if is_correct_prediction(expected, actual) {
            self.correct += 1;
        }
        self.matches += 1;
    }

    pub fn finish(&self) -> RunMetrics {
        if self.matches == 0 {
            return RunMetrics::default();
        }
        RunMetrics {
            matches_used: self.matches,
            accuracy: self.correct as f64 / self.matches as f64,
            log_loss: self.total_log_loss / self.matches as f64,
        }
    }
}
