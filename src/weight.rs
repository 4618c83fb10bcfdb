use std::{fmt, str::FromStr};

use thiserror::Error;

/// Round margin that doubles an update under [`WeightMode::Linear`].
pub const ROUND_MARGIN_SCALE: f64 = 12.0;

/// How the round margin of a match scales its rating update.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum WeightMode {
    /// Every match has weight `1`.
    None,
    /// `1 + margin / 12`, capped.
    #[default]
    Linear,
    /// `1 + sqrt(margin) / sqrt(12)`, capped.
    Sqrt,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown weight mode: {0:?} (expected none, linear or sqrt)")]
pub struct InvalidWeightMode(pub String);

impl FromStr for WeightMode {
    type Err = InvalidWeightMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => WeightMode::None,
            "linear" => WeightMode::Linear,
            "sqrt" => WeightMode::Sqrt,
            _ => return Err(InvalidWeightMode(s.to_owned())),
        })
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightMode::None => "none",
            WeightMode::Linear => "linear",
            WeightMode::Sqrt => "sqrt",
        })
    }
}

impl WeightMode {
    /// Weight for a match decided by `margin` rounds, before capping.
    pub fn uncapped_weight(self, margin: u32) -> f64 {
        let margin = f64::from(margin);
        match self {
            WeightMode::None => 1.0,
            WeightMode::Linear => 1.0 + margin / ROUND_MARGIN_SCALE,
            WeightMode::Sqrt => 1.0 + margin.sqrt() / ROUND_MARGIN_SCALE.sqrt(),
        }
    }

    /// Weight for a match decided by `margin` rounds. `cap` does not apply
    /// to [`WeightMode::None`].
    pub fn weight(self, margin: u32, cap: f64) -> f64 {
        match self {
            WeightMode::None => 1.0,
            WeightMode::Linear | WeightMode::Sqrt => f64::min(cap, self.uncapped_weight(margin)),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("none".parse(), Ok(WeightMode::None));
        assert_eq!("linear".parse(), Ok(WeightMode::Linear));
        assert_eq!("sqrt".parse(), Ok(WeightMode::Sqrt));
        assert_eq!(
            "Linear".parse::<WeightMode>(),
            Err(InvalidWeightMode("Linear".to_owned()))
        );
        assert!("log".parse::<WeightMode>().is_err());
        assert!("".parse::<WeightMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [WeightMode::None, WeightMode::Linear, WeightMode::Sqrt] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn test_weights() {
        assert_eq!(WeightMode::Linear.weight(12, 2.0), 2.0);
        assert_eq!(WeightMode::Linear.weight(6, 2.0), 1.5);
        assert_eq!(WeightMode::Linear.weight(24, 2.0), 2.0);
        assert_eq!(WeightMode::Linear.weight(0, 2.0), 1.0);
        assert_eq!(WeightMode::Sqrt.weight(12, 3.0), 2.0);
        assert_eq!(WeightMode::Sqrt.weight(0, 3.0), 1.0);
        assert_eq!(WeightMode::None.weight(16, 2.0), 1.0);
    }

    proptest! {
        #[test]
        fn weight_is_bounded(margin in 0u32..1000, cap in 1.0f64..10.0) {
            for mode in [WeightMode::Linear, WeightMode::Sqrt] {
                let w = mode.weight(margin, cap);
                prop_assert!(w >= 1.0);
                prop_assert!(w <= cap);
            }
            prop_assert_eq!(WeightMode::None.weight(margin, cap), 1.0);
        }
    }
}
