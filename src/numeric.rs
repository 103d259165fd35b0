//! Numeric conversion helpers.
//!
//! Simulation time is tracked in `f64` seconds while geometry is `f32`. These
//! helpers guard the narrowing step with debug assertions so that call sites
//! stay ergonomic.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers pass frame deltas which are far inside f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Returns `true` when `value` is finite and strictly positive.
#[must_use]
pub fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
