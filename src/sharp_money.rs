use serde::{Deserialize, Serialize};

use crate::action::MoneyDirection;
use crate::prediction::Prediction;

const LINE_MOVE_THRESHOLD: f64 = 0.10;
const DIVERGENCE_THRESHOLD: f64 = 0.10;
const HIGH_EFFICIENCY: f64 = 90.0;

const LINE_MOVE_BONUS: f64 = 0.10;
const DIVERGENCE_BONUS: f64 = 0.15;
const SMART_MONEY_BONUS: f64 = 0.20;
const EFFICIENCY_BONUS: f64 = 0.10;

pub const LABEL_LINE_MOVEMENT: &str = "significant line movement";
pub const LABEL_DIVERGENCE: &str = "model-market divergence";
pub const LABEL_SMART_MONEY: &str = "smart money confirmation";
pub const LABEL_EFFICIENCY: &str = "high market efficiency";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpMoneyReading {
    pub strength: f64,
    pub direction: MoneyDirection,
    pub indicators: Vec<String>,
}

pub fn analyze_sharp_money(prediction: &Prediction) -> SharpMoneyReading {
    let market = &prediction.market;
    let mut strength = market.sharp_confidence;
    let mut indicators = Vec::new();

    if market.line_movement.abs() > LINE_MOVE_THRESHOLD {
        strength += LINE_MOVE_BONUS;
        indicators.push(LABEL_LINE_MOVEMENT.to_string());
    }

    if model_market_divergence(prediction) > DIVERGENCE_THRESHOLD {
        strength += DIVERGENCE_BONUS;
        indicators.push(LABEL_DIVERGENCE.to_string());
    }

    if prediction.analysis.smart_money_indicator {
        strength += SMART_MONEY_BONUS;
        indicators.push(LABEL_SMART_MONEY.to_string());
    }

    if prediction.analysis.market_efficiency > HIGH_EFFICIENCY {
        strength += EFFICIENCY_BONUS;
        indicators.push(LABEL_EFFICIENCY.to_string());
    }

    let direction = if market.line_movement > 0.0 {
        MoneyDirection::Bullish
    } else {
        MoneyDirection::Bearish
    };

    SharpMoneyReading {
        strength: strength.min(1.0),
        direction,
        indicators,
    }
}

pub fn model_market_divergence(prediction: &Prediction) -> f64 {
    let model_odds = 1.0 / prediction.confidence;
    let market_odds = prediction.market.sharp_odds.min();
    (model_odds - market_odds).abs() / market_odds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{
        MarketSignals, MatchAnalysis, OutcomeProbs, RiskLevel, RiskMetrics,
    };

    fn base(sharp: f64, line: f64, smart: bool, efficiency: f64) -> Prediction {
        Prediction {
            match_label: "Home vs Away".to_string(),
            prediction: String::new(),
            confidence: 0.5,
            probabilities: OutcomeProbs { home: 0.5, draw: 0.25, away: 0.25 },
            market: MarketSignals {
                implied: OutcomeProbs { home: 0.5, draw: 0.25, away: 0.25 },
                // min odds 2.0 == 1 / 0.5, so no divergence by default.
                sharp_odds: OutcomeProbs { home: 2.0, draw: 4.0, away: 4.0 },
                sharp_confidence: sharp,
                line_movement: line,
            },
            risk: RiskMetrics {
                probability_variance: 0.0,
                market_volatility: 0.0,
                confidence_spread: 0.0,
                sharp_money_risk: 0.0,
                overall_risk_score: 0.2,
            },
            value_opportunities: Vec::new(),
            analysis: MatchAnalysis {
                innovation_score: 50.0,
                market_position: "neutral".to_string(),
                risk_level: RiskLevel::Low,
                execution_confidence: 50.0,
                market_efficiency: efficiency,
                value_detection: String::new(),
                line_movement_impact: 0.0,
                smart_money_indicator: smart,
            },
        }
    }

    #[test]
    fn quiet_market_keeps_base_strength() {
        let reading = analyze_sharp_money(&base(0.4, 0.05, false, 80.0));
        assert!((reading.strength - 0.4).abs() < 1e-12);
        assert!(reading.indicators.is_empty());
        assert_eq!(reading.direction, MoneyDirection::Bullish);
    }

    #[test]
    fn all_bonuses_clamp_to_one() {
        let mut p = base(0.9, 0.15, true, 95.0);
        p.confidence = 0.9; // 1/0.9 = 1.11 vs 2.0 => large divergence
        let reading = analyze_sharp_money(&p);
        assert_eq!(reading.strength, 1.0);
        assert_eq!(
            reading.indicators,
            vec![LABEL_LINE_MOVEMENT, LABEL_DIVERGENCE, LABEL_SMART_MONEY, LABEL_EFFICIENCY]
        );
    }

    #[test]
    fn direction_follows_line_sign() {
        assert_eq!(analyze_sharp_money(&base(0.5, -0.2, false, 80.0)).direction, MoneyDirection::Bearish);
        assert_eq!(analyze_sharp_money(&base(0.5, 0.0, false, 80.0)).direction, MoneyDirection::Bearish);
    }

    #[test]
    fn negative_line_movement_counts_by_magnitude() {
        let reading = analyze_sharp_money(&base(0.5, -0.12, false, 80.0));
        assert!((reading.strength - 0.6).abs() < 1e-12);
        assert_eq!(reading.indicators, vec![LABEL_LINE_MOVEMENT]);
    }
}
