use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;

const W_CONFIDENCE: f64 = 0.30;
const W_SHARP: f64 = 0.20;
const W_SAFETY: f64 = 0.20;
const W_EXECUTION: f64 = 0.15;
const W_EFFICIENCY: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentGrade {
    Avoid,
    Hold,
    Buy,
    BuyHeavy,
}

impl InvestmentGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentGrade::BuyHeavy => "BUY_HEAVY",
            InvestmentGrade::Buy => "BUY",
            InvestmentGrade::Hold => "HOLD",
            InvestmentGrade::Avoid => "AVOID",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, InvestmentGrade::Buy | InvestmentGrade::BuyHeavy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAnalysis {
    pub grade: InvestmentGrade,
    // Best edge as a fraction; 0 when there is nothing to buy.
    pub margin_of_safety: f64,
    // Model confidence stands in for the "true" probability.
    pub intrinsic_value: f64,
    pub quality_score: f64,
}

pub fn analyze_value(prediction: &Prediction) -> ValueAnalysis {
    let intrinsic_value = prediction.confidence;
    let margin_of_safety = prediction
        .best_opportunity()
        .map(|v| v.edge_percentage / 100.0)
        .unwrap_or(0.0);
    let quality_score = quality_score(prediction);

    ValueAnalysis {
        grade: grade_for(intrinsic_value, margin_of_safety, quality_score),
        margin_of_safety,
        intrinsic_value,
        quality_score,
    }
}

pub fn quality_score(prediction: &Prediction) -> f64 {
    let analysis = &prediction.analysis;
    W_CONFIDENCE * prediction.confidence
        + W_SHARP * prediction.market.sharp_confidence
        + W_SAFETY * (1.0 - prediction.risk.overall_risk_score)
        + W_EXECUTION * (analysis.execution_confidence / 100.0)
        + W_EFFICIENCY * (analysis.market_efficiency / 100.0)
}

pub fn grade_for(intrinsic_value: f64, margin_of_safety: f64, quality: f64) -> InvestmentGrade {
    if intrinsic_value > 0.80 && margin_of_safety > 0.15 && quality > 0.85 {
        InvestmentGrade::BuyHeavy
    } else if intrinsic_value > 0.70 && margin_of_safety > 0.10 && quality > 0.75 {
        InvestmentGrade::Buy
    } else if intrinsic_value > 0.60 && quality > 0.60 {
        InvestmentGrade::Hold
    } else {
        InvestmentGrade::Avoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_table() {
        assert_eq!(grade_for(0.9, 0.2, 0.9), InvestmentGrade::BuyHeavy);
        assert_eq!(grade_for(0.9, 0.15, 0.9), InvestmentGrade::Buy);
        assert_eq!(grade_for(0.75, 0.12, 0.8), InvestmentGrade::Buy);
        assert_eq!(grade_for(0.75, 0.0, 0.8), InvestmentGrade::Hold);
        assert_eq!(grade_for(0.65, 0.5, 0.61), InvestmentGrade::Hold);
        assert_eq!(grade_for(0.6, 0.5, 0.99), InvestmentGrade::Avoid);
        assert_eq!(grade_for(0.99, 0.5, 0.6), InvestmentGrade::Avoid);
    }

    #[test]
    fn grade_is_monotonic_in_each_input() {
        let steps: Vec<f64> = (0..=20).map(|i| i as f64 * 0.05).collect();
        for &a in &steps {
            for &b in &steps {
                let mut prev = [InvestmentGrade::Avoid; 3];
                for &x in &steps {
                    let now = [grade_for(x, a, b), grade_for(a, x, b), grade_for(a, b, x)];
                    for i in 0..3 {
                        assert!(now[i] >= prev[i], "grade dropped at {a} {b} {x} (axis {i})");
                    }
                    prev = now;
                }
            }
        }
    }
}
