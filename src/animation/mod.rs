//! Keyframe interpolation: easing, tweening, the keyframe sequence evaluator and the freezer.

/// Easing curves.
pub mod ease;
/// Time-pinning wrapper for shared drawables.
pub mod frozen;
/// Keyframe sequence evaluator.
pub mod keyframes;
/// Interpolation contract.
pub mod tween;
