//! Guarded division
//!
//! Force and collision math divide by quantities that can reach zero
//! (vertical speed, yaw rate, elimination pivots). These helpers make the
//! fallback explicit at each call site instead of letting NaN or infinity
//! propagate into the body state.

/// Divides `numerator` by `denominator`, yielding 0.0 when the quotient is not finite.
///
/// Used where a degenerate division should contribute nothing (lift, yaw drive).
#[inline]
pub fn guarded_div(numerator: f32, denominator: f32) -> f32 {
    checked_div(numerator, denominator).unwrap_or(0.0)
}

/// Divides `numerator` by `denominator`, yielding `None` when the quotient is not finite.
///
/// Used where a degenerate division must mean "no answer" rather than zero,
/// e.g. segment parameters for parallel edges.
#[inline]
pub fn checked_div(numerator: f32, denominator: f32) -> Option<f32> {
    let q = numerator / denominator;
    q.is_finite().then_some(q)
}
