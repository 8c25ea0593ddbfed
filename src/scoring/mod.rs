// Post scoring: novelty, spam heuristics and engagement.

pub mod engagement;
pub mod novelty;
pub mod spam;

/// Round to two decimal places, halves away from zero.
///
/// Every reported 2-decimal score goes through this one function.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
