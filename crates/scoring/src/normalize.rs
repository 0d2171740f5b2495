// crates/scoring/src/normalize.rs

/// Ratio used when the reference side of a comparison is zero or negative
pub const NEUTRAL_RATIO: f64 = 1.0;

/// Direction in which a sub-indicator improves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Clamp into [0, 1]. NaN passes through untouched.
pub fn normalize(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Compare a candidate value against a reference value.
///
/// Higher-is-better yields `candidate / reference`, lower-is-better yields
/// `reference / candidate`. The result is not clamped.
///
/// Zero or negative denominators never divide:
/// - a non-positive reference gives [`NEUTRAL_RATIO`];
/// - a non-positive candidate under [`Polarity::LowerIsBetter`] gives 0.0.
pub fn relative_ratio(candidate: f64, reference: f64, polarity: Polarity) -> f64 {
    match polarity {
        Polarity::HigherIsBetter => {
            if reference > 0.0 {
                candidate / reference
            } else {
                NEUTRAL_RATIO
            }
        }
        Polarity::LowerIsBetter => {
            if reference <= 0.0 {
                NEUTRAL_RATIO
            } else if candidate <= 0.0 {
                0.0
            } else {
                reference / candidate
            }
        }
    }
}

/// [`relative_ratio`] clamped through [`normalize`]
pub fn normalized_ratio(candidate: f64, reference: f64, polarity: Polarity) -> f64 {
    normalize(relative_ratio(candidate, reference, polarity))
}
