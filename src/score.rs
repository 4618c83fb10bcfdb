use std::ops;

/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win for the first team.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl From<Score> for f64 {
    #[inline]
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// Actual score of the first team, given the rounds won by each side.
    pub fn from_rounds(first_rounds: u32, second_rounds: u32) -> Score {
        match first_rounds.cmp(&second_rounds) {
            std::cmp::Ordering::Greater => Score::WIN,
            std::cmp::Ordering::Less => Score::LOSS,
            std::cmp::Ordering::Equal => Score::DRAW,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn clamp(self, Score(min): Score, Score(max): Score) -> Score {
        Score(self.0.clamp(min, max))
    }

    pub fn is_win(self) -> bool {
        self == Score::WIN
    }

    pub fn is_loss(self) -> bool {
        self == Score::LOSS
    }
}

impl ops::Sub<Score> for Score {
    type Output = f64;

    #[inline]
    fn sub(self, rhs: Score) -> f64 {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rounds() {
        assert_eq!(Score::from_rounds(16, 4), Score::WIN);
        assert_eq!(Score::from_rounds(11, 13), Score::LOSS);
        assert_eq!(Score::from_rounds(15, 15), Score::DRAW);
        assert_eq!(Score::from_rounds(0, 0), Score::DRAW);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Score::WIN.opposite(), Score::LOSS);
        assert_eq!(Score::DRAW.opposite(), Score::DRAW);
        assert_eq!(Score(0.25).opposite(), Score(0.75));
    }

    #[test]
    fn test_clamp() {
        let (min, max) = (Score(0.1), Score(0.9));
        assert_eq!(Score::LOSS.clamp(min, max), min);
        assert_eq!(Score::WIN.clamp(min, max), max);
        assert_eq!(Score::DRAW.clamp(min, max), Score::DRAW);
    }
}
