use serde::{Deserialize, Serialize};

use crate::filter::DecisionTier;
use crate::prediction::{Prediction, ValueOpportunity};
use crate::value_grade::InvestmentGrade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    MarketAlert {
        message: String,
        level: AlertLevel,
        market_data: AlertData,
    },
    ValueOpportunity {
        prediction: Box<Prediction>,
        opportunity: ValueOpportunity,
        value_score: f64,
        // Fraction, e.g. 0.25 for a 25% edge.
        edge: f64,
    },
    SharpMoneySignal {
        #[serde(rename = "match")]
        match_label: String,
        strength: f64,
        direction: MoneyDirection,
    },
    LineMovementAlert {
        #[serde(rename = "match")]
        match_label: String,
        movement: f64,
        impact: MovementImpact,
    },
    RiskWarning {
        #[serde(rename = "match")]
        match_label: String,
        risk_factors: Vec<String>,
        severity: Severity,
    },
    StrategicMove {
        action: String,
        reasoning: String,
        expected_roi: f64,
    },
    MarketDomination {
        opportunities: usize,
        total_edge: f64,
    },
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    MarketAlert,
    ValueOpportunity,
    SharpMoneySignal,
    LineMovementAlert,
    RiskWarning,
    StrategicMove,
    MarketDomination,
    Ignore,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::MarketAlert => "MARKET_ALERT",
            ActionKind::ValueOpportunity => "VALUE_OPPORTUNITY",
            ActionKind::SharpMoneySignal => "SHARP_MONEY_SIGNAL",
            ActionKind::LineMovementAlert => "LINE_MOVEMENT_ALERT",
            ActionKind::RiskWarning => "RISK_WARNING",
            ActionKind::StrategicMove => "STRATEGIC_MOVE",
            ActionKind::MarketDomination => "MARKET_DOMINATION",
            ActionKind::Ignore => "IGNORE",
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::MarketAlert { .. } => ActionKind::MarketAlert,
            Action::ValueOpportunity { .. } => ActionKind::ValueOpportunity,
            Action::SharpMoneySignal { .. } => ActionKind::SharpMoneySignal,
            Action::LineMovementAlert { .. } => ActionKind::LineMovementAlert,
            Action::RiskWarning { .. } => ActionKind::RiskWarning,
            Action::StrategicMove { .. } => ActionKind::StrategicMove,
            Action::MarketDomination { .. } => ActionKind::MarketDomination,
            Action::Ignore => ActionKind::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementImpact {
    Significant,
    Moderate,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertData {
    #[serde(rename = "match")]
    pub match_label: String,
    pub filter_score: u8,
    pub tier: DecisionTier,
    pub grade: InvestmentGrade,
    pub confidence: f64,
    pub sharp_strength: f64,
    pub overall_risk_score: f64,
    pub line_movement: f64,
    pub smart_money_indicator: bool,
    pub edge_percentage: Option<f64>,
}
