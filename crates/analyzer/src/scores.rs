use core_types::{DerivedScores, Scorecard};

/// Upper end of the conviction/stress scale.
const SCORE_CEIL: i64 = 4;

/// Normalizes a raw wire value onto the 0..=4 scale before any arithmetic.
fn clamp04(value: i64) -> u8 {
    value.clamp(0, SCORE_CEIL) as u8
}

/// Computes the normalized conviction/stress pair from a raw scorecard.
///
/// Rule: stress discounts conviction point for point,
/// `conviction = clamp(raw - stress, 0, 4)`. A report that carries only a
/// stress gauge is scored from the top of the scale, `clamp(4 - stress)`;
/// one with no stress gauge keeps its raw (clamped) conviction. Missing or
/// non-numeric raw conviction counts as 0. Inputs are clamped onto the
/// scale before subtraction and the result clamped again, so the output
/// cannot leave `0..=4`.
///
/// Pure and deterministic; the only place score arithmetic happens.
pub fn derive(scorecard: &Scorecard) -> DerivedScores {
    let stress = scorecard.stress.map(clamp04);

    let conviction = match (scorecard.conviction, stress) {
        (Some(raw), Some(stress)) => clamp04(i64::from(clamp04(raw)) - i64::from(stress)),
        (None, Some(stress)) => clamp04(SCORE_CEIL - i64::from(stress)),
        (raw, None) => clamp04(raw.unwrap_or(0)),
    };

    DerivedScores { conviction, stress }
}
