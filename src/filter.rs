use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;

const MIN_CONFIDENCE: f64 = 0.70;
const MIN_MARKET_VALIDATION: f64 = 0.65;
const MIN_VALUE_EDGE_PCT: f64 = 10.0;
const MAX_RISK_SCORE: f64 = 0.30;
// Liquidity has no direct feed; sharp confidence stands in with a looser bar.
const MIN_LIQUIDITY_PROXY: f64 = 0.50;
const MAX_MARKET_EFFICIENCY: f64 = 90.0;

const DOMINATE_MIN_SCORE: u8 = 6;
const DOMINATE_MIN_CONFIDENCE: f64 = 0.85;
const DOMINATE_MIN_EDGE_PCT: f64 = 20.0;
const EXECUTE_MIN_SCORE: u8 = 5;
const EXECUTE_MIN_CONFIDENCE: f64 = 0.75;
const MONITOR_MIN_SCORE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionTier {
    Avoid,
    Monitor,
    Execute,
    Dominate,
}

impl DecisionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionTier::Dominate => "DOMINATE",
            DecisionTier::Execute => "EXECUTE",
            DecisionTier::Monitor => "MONITOR",
            DecisionTier::Avoid => "AVOID",
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, DecisionTier::Dominate | DecisionTier::Execute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub confidence_check: bool,
    pub market_validation: bool,
    pub sharp_money_alignment: bool,
    pub value_opportunity: bool,
    pub risk_assessment: bool,
    pub liquidity_check: bool,
    pub information_edge: bool,
    pub tier: DecisionTier,
}

impl FilterResult {
    pub fn checks(&self) -> [bool; 7] {
        [
            self.confidence_check,
            self.market_validation,
            self.sharp_money_alignment,
            self.value_opportunity,
            self.risk_assessment,
            self.liquidity_check,
            self.information_edge,
        ]
    }

    pub fn score(&self) -> u8 {
        self.checks().iter().filter(|passed| **passed).count() as u8
    }
}

pub fn evaluate_filter(prediction: &Prediction) -> FilterResult {
    let market = &prediction.market;
    let analysis = &prediction.analysis;

    let mut result = FilterResult {
        confidence_check: prediction.confidence > MIN_CONFIDENCE,
        market_validation: market.sharp_confidence > MIN_MARKET_VALIDATION,
        sharp_money_alignment: analysis.smart_money_indicator,
        value_opportunity: prediction.has_edge_above(MIN_VALUE_EDGE_PCT),
        risk_assessment: prediction.risk.overall_risk_score < MAX_RISK_SCORE,
        liquidity_check: market.sharp_confidence > MIN_LIQUIDITY_PROXY,
        information_edge: analysis.market_efficiency < MAX_MARKET_EFFICIENCY,
        tier: DecisionTier::Avoid,
    };
    result.tier = decide_tier(
        result.score(),
        prediction.confidence,
        prediction.has_edge_above(DOMINATE_MIN_EDGE_PCT),
    );
    result
}

pub fn decide_tier(score: u8, confidence: f64, has_dominant_edge: bool) -> DecisionTier {
    if score >= DOMINATE_MIN_SCORE && confidence > DOMINATE_MIN_CONFIDENCE && has_dominant_edge {
        DecisionTier::Dominate
    } else if score >= EXECUTE_MIN_SCORE && confidence > EXECUTE_MIN_CONFIDENCE {
        DecisionTier::Execute
    } else if score >= MONITOR_MIN_SCORE {
        DecisionTier::Monitor
    } else {
        DecisionTier::Avoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table() {
        assert_eq!(decide_tier(7, 0.9, true), DecisionTier::Dominate);
        assert_eq!(decide_tier(6, 0.86, true), DecisionTier::Dominate);
        assert_eq!(decide_tier(7, 0.9, false), DecisionTier::Execute);
        assert_eq!(decide_tier(5, 0.9, true), DecisionTier::Execute);
        assert_eq!(decide_tier(5, 0.75, true), DecisionTier::Monitor);
        assert_eq!(decide_tier(4, 0.99, true), DecisionTier::Monitor);
        assert_eq!(decide_tier(3, 0.1, false), DecisionTier::Monitor);
        assert_eq!(decide_tier(2, 0.99, true), DecisionTier::Avoid);
        assert_eq!(decide_tier(0, 0.0, false), DecisionTier::Avoid);
    }

    #[test]
    fn confidence_boundary_is_strict() {
        assert_eq!(decide_tier(6, 0.85, true), DecisionTier::Execute);
        assert_eq!(decide_tier(4, 0.85, true), DecisionTier::Monitor);
    }

    #[test]
    fn tier_ordering_and_strength() {
        assert!(DecisionTier::Dominate > DecisionTier::Execute);
        assert!(DecisionTier::Execute.is_strong());
        assert!(!DecisionTier::Monitor.is_strong());
        assert_eq!(DecisionTier::Avoid.as_str(), "AVOID");
    }
}
