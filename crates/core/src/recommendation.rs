//! Static sleep-hygiene advice.

use serde::Serialize;

/// A single piece of advice returned by the recommendations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub recommendation: &'static str,
    pub reason: &'static str,
    pub action: &'static str,
    pub source: &'static str,
}

/// The advice served to every user until a real model is wired in.
pub const DEFAULT_RECOMMENDATION: Recommendation = Recommendation {
    recommendation: "Try to maintain a consistent sleep schedule.",
    reason: "Regular sleep improves quality.",
    action: "Go to bed and wake up at the same time every day.",
    source: "MockGPT",
};
