use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "match")]
    pub match_label: String,
    // Predicted outcome label ("Home Win", "Draw", ...). Display only.
    #[serde(default)]
    pub prediction: String,
    pub confidence: f64,
    pub probabilities: OutcomeProbs,
    pub market: MarketSignals,
    pub risk: RiskMetrics,
    #[serde(default)]
    pub value_opportunities: Vec<ValueOpportunity>,
    pub analysis: MatchAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbs {
    pub fn min(&self) -> f64 {
        self.home.min(self.draw).min(self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSignals {
    // Prediction-market implied probabilities (fractions).
    pub implied: OutcomeProbs,
    // Sharp-book decimal odds.
    pub sharp_odds: OutcomeProbs,
    pub sharp_confidence: f64,
    // Signed fractional move of the line since open.
    pub line_movement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub probability_variance: f64,
    pub market_volatility: f64,
    pub confidence_spread: f64,
    pub sharp_money_risk: f64,
    pub overall_risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueOpportunity {
    pub outcome: String,
    // Percentage points, e.g. 12.5 means 12.5%.
    pub edge_percentage: f64,
    pub model_probability: f64,
    pub market_probability: f64,
    pub recommended_odds: f64,
    pub confidence_level: ConfidenceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub innovation_score: f64,
    pub market_position: String,
    pub risk_level: RiskLevel,
    pub execution_confidence: f64,
    // 0-100, higher means the price already reflects what is known.
    pub market_efficiency: f64,
    #[serde(default)]
    pub value_detection: String,
    pub line_movement_impact: f64,
    pub smart_money_indicator: bool,
}

impl Prediction {
    pub fn best_opportunity(&self) -> Option<&ValueOpportunity> {
        // Ties keep the earlier entry.
        self.value_opportunities.iter().fold(None, |best, cur| match best {
            Some(b) if cur.edge_percentage <= b.edge_percentage => Some(b),
            _ => Some(cur),
        })
    }

    pub fn top_opportunity(&self) -> Option<&ValueOpportunity> {
        self.value_opportunities.first()
    }

    pub fn has_edge_above(&self, pct: f64) -> bool {
        self.value_opportunities.iter().any(|v| v.edge_percentage > pct)
    }
}
