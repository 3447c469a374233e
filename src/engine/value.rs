use tracing::debug;

use super::round_to;
use crate::config::ModelConfig;
use crate::domain::{MarketEstimate, ValueSignal};

/// Implied probability (percent) of decimal odds; `None` for unusable prices
pub fn implied_probability(odds: f64) -> Option<f64> {
    if odds.is_finite() && odds > 1.0 {
        Some(100.0 / odds)
    } else {
        None
    }
}

/// Flags markets where the model disagrees with the price
#[derive(Debug, Clone, Copy)]
pub struct ValueDetector {
    /// Percentage points the model must exceed the implied probability by
    margin: f64,
    /// Goal-market probability above which a high-probability signal fires
    high_confidence_threshold: f64,
}

impl Default for ValueDetector {
    fn default() -> Self {
        Self::new(&ModelConfig::default())
    }
}

impl ValueDetector {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            margin: config.value_margin,
            high_confidence_threshold: config.high_confidence_threshold,
        }
    }

    /// Value signal when `probability - 100 / odds > margin` (strictly)
    pub fn evaluate(&self, estimate: &MarketEstimate) -> Option<ValueSignal> {
        let odds = estimate.odds?;
        let implied = implied_probability(odds)?;
        let edge = estimate.probability - implied;
        if edge <= self.margin {
            return None;
        }

        let expected_value = estimate.probability / 100.0 * odds - 1.0;
        debug!(
            market = %estimate.market,
            probability = estimate.probability,
            odds,
            edge,
            "value detected"
        );

        Some(ValueSignal::Value {
            market: estimate.market,
            label: format!(
                "VALUE: {} @ {:.2} (EV {:+.1}%)",
                estimate.label,
                odds,
                expected_value * 100.0
            ),
            probability: estimate.probability,
            odds,
            implied_probability: round_to(implied, 1),
            edge: round_to(edge, 1),
            expected_value: round_to(expected_value, 3),
        })
    }

    /// Odds-independent signal for goal markets rated above the threshold
    pub fn high_probability(&self, estimate: &MarketEstimate) -> Option<ValueSignal> {
        if !estimate.market.is_goal_market()
            || estimate.probability <= self.high_confidence_threshold
        {
            return None;
        }

        Some(ValueSignal::HighProbability {
            market: estimate.market,
            label: format!(
                "HIGH PROBABILITY: {} ({:.1}%)",
                estimate.label, estimate.probability
            ),
            probability: estimate.probability,
        })
    }

    /// All signals for a set of estimates, value signals first
    pub fn scan(&self, estimates: &[MarketEstimate]) -> Vec<ValueSignal> {
        let mut signals: Vec<ValueSignal> =
            estimates.iter().filter_map(|e| self.evaluate(e)).collect();
        signals.extend(estimates.iter().filter_map(|e| self.high_probability(e)));
        signals
    }
}
