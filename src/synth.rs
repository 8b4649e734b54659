use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Action, AlertData, AlertLevel, MovementImpact, Severity};
use crate::filter::{DecisionTier, FilterResult, evaluate_filter};
use crate::prediction::{Prediction, RiskLevel, ValueOpportunity};
use crate::sharp_money::{SharpMoneyReading, analyze_sharp_money};
use crate::value_grade::{InvestmentGrade, ValueAnalysis, analyze_value};

const SHARP_SIGNAL_MIN_STRENGTH: f64 = 0.7;
const AVOID_ALERT_MAX_CONFIDENCE: f64 = 0.5;
const AVOID_ALERT_MIN_RISK: f64 = 0.5;
// EXECUTE positions are sized below full conviction.
const EXECUTE_VALUE_WEIGHT: f64 = 0.7;

const LINE_ALERT_THRESHOLD: f64 = 0.10;
const LINE_SIGNIFICANT: f64 = 0.20;
const LINE_MODERATE: f64 = 0.05;

const RISK_WARNING_SCORE: f64 = 0.40;
const RISK_FACTOR_VARIANCE: f64 = 0.15;
const RISK_FACTOR_VOLATILITY: f64 = 0.15;
const RISK_FACTOR_SHARP: f64 = 0.40;
const RISK_FACTOR_EFFICIENCY: f64 = 95.0;
const SEVERITY_HIGH: f64 = 0.6;
const SEVERITY_MEDIUM: f64 = 0.3;

pub const MOVE_DOMINATE: &str = "DOMINATE_POSITION";
pub const MOVE_EXECUTE: &str = "EXECUTE_POSITION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAssessment {
    pub filter: FilterResult,
    pub value: ValueAnalysis,
    pub sharp: SharpMoneyReading,
}

impl MatchAssessment {
    pub fn tier(&self) -> DecisionTier {
        self.filter.tier
    }

    pub fn score(&self) -> u8 {
        self.filter.score()
    }
}

pub fn assess(prediction: &Prediction) -> MatchAssessment {
    MatchAssessment {
        filter: evaluate_filter(prediction),
        value: analyze_value(prediction),
        sharp: analyze_sharp_money(prediction),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContribution {
    // DOMINATE tier with a BUY_HEAVY grade.
    pub domination: bool,
    pub value_score: f64,
    // DOMINATE or EXECUTE tier, regardless of grade.
    pub strong: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub assessment: MatchAssessment,
    pub actions: Vec<Action>,
    pub contribution: PortfolioContribution,
}

pub fn synthesize(prediction: &Prediction, assessment: MatchAssessment) -> Synthesis {
    let mut actions = Vec::new();
    let mut contribution = PortfolioContribution {
        strong: assessment.tier().is_strong(),
        ..PortfolioContribution::default()
    };

    let tier = assessment.tier();
    let best = prediction.best_opportunity();
    let top = prediction.top_opportunity();

    match (tier, assessment.value.grade, best, top) {
        (DecisionTier::Dominate, InvestmentGrade::BuyHeavy, Some(best), _) => {
            contribution.domination = true;
            contribution.value_score = best.edge_percentage;
            push_dominate(&mut actions, prediction, &assessment, best);
        }
        (DecisionTier::Execute, _, _, Some(top)) => {
            contribution.value_score = top.edge_percentage * EXECUTE_VALUE_WEIGHT;
            push_execute(&mut actions, prediction, &assessment, top);
        }
        (DecisionTier::Monitor, ..) => {
            actions.push(Action::MarketAlert {
                message: format!(
                    "Monitoring {}: {}/7 filters passed, value grade {}",
                    prediction.match_label,
                    assessment.score(),
                    assessment.value.grade.as_str()
                ),
                level: AlertLevel::Info,
                market_data: alert_data(prediction, &assessment, None),
            });
        }
        (DecisionTier::Avoid, ..) => {
            let conf = prediction.confidence;
            let risk = prediction.risk.overall_risk_score;
            if conf < AVOID_ALERT_MAX_CONFIDENCE || risk > AVOID_ALERT_MIN_RISK {
                actions.push(Action::MarketAlert {
                    message: format!(
                        "Avoid {}: confidence {:.0}%, risk score {:.2}",
                        prediction.match_label,
                        conf * 100.0,
                        risk
                    ),
                    level: AlertLevel::Danger,
                    market_data: alert_data(prediction, &assessment, None),
                });
            }
        }
        // DOMINATE without BUY_HEAVY, or EXECUTE with nothing to buy: no tier action.
        _ => {}
    }

    push_line_movement(&mut actions, prediction, &assessment);
    push_risk_warning(&mut actions, prediction);

    debug!(
        target: "signal_fusion::synth",
        match_label = %prediction.match_label,
        score = assessment.score(),
        tier = tier.as_str(),
        grade = assessment.value.grade.as_str(),
        strength = assessment.sharp.strength,
        actions = actions.len(),
        "match synthesized"
    );

    Synthesis {
        assessment,
        actions,
        contribution,
    }
}

fn push_dominate(
    actions: &mut Vec<Action>,
    prediction: &Prediction,
    assessment: &MatchAssessment,
    best: &ValueOpportunity,
) {
    let edge = best.edge_percentage;
    actions.push(Action::MarketDomination {
        opportunities: 1,
        total_edge: edge,
    });
    actions.push(value_action(prediction, assessment, best));
    actions.push(Action::MarketAlert {
        message: format!(
            "DOMINATE {}: {} carries a {:.1}% edge at {:.0}% confidence",
            prediction.match_label,
            best.outcome,
            edge,
            prediction.confidence * 100.0
        ),
        level: AlertLevel::Success,
        market_data: alert_data(prediction, assessment, Some(edge)),
    });
    actions.push(Action::StrategicMove {
        action: MOVE_DOMINATE.to_string(),
        reasoning: format!(
            "{}/7 filters passed with a BUY_HEAVY grade; margin of safety {:.1}%, quality {:.2}",
            assessment.score(),
            assessment.value.margin_of_safety * 100.0,
            assessment.value.quality_score
        ),
        expected_roi: edge,
    });
}

fn push_execute(
    actions: &mut Vec<Action>,
    prediction: &Prediction,
    assessment: &MatchAssessment,
    top: &ValueOpportunity,
) {
    let edge = top.edge_percentage;
    actions.push(value_action(prediction, assessment, top));
    if assessment.sharp.strength > SHARP_SIGNAL_MIN_STRENGTH {
        actions.push(Action::SharpMoneySignal {
            match_label: prediction.match_label.clone(),
            strength: assessment.sharp.strength,
            direction: assessment.sharp.direction,
        });
    }
    actions.push(Action::MarketAlert {
        message: format!(
            "EXECUTE {}: {} at {:.1}% edge, sharp strength {:.2}",
            prediction.match_label, top.outcome, edge, assessment.sharp.strength
        ),
        level: AlertLevel::Success,
        market_data: alert_data(prediction, assessment, Some(edge)),
    });
    actions.push(Action::StrategicMove {
        action: MOVE_EXECUTE.to_string(),
        reasoning: format!(
            "{}/7 filters passed; value grade {}, sharp indicators: {}",
            assessment.score(),
            assessment.value.grade.as_str(),
            if assessment.sharp.indicators.is_empty() {
                "none".to_string()
            } else {
                assessment.sharp.indicators.join(", ")
            }
        ),
        expected_roi: edge,
    });
}

fn value_action(
    prediction: &Prediction,
    assessment: &MatchAssessment,
    opportunity: &ValueOpportunity,
) -> Action {
    Action::ValueOpportunity {
        prediction: Box::new(prediction.clone()),
        opportunity: opportunity.clone(),
        value_score: assessment.value.quality_score,
        edge: opportunity.edge_percentage / 100.0,
    }
}

fn push_line_movement(actions: &mut Vec<Action>, prediction: &Prediction, assessment: &MatchAssessment) {
    let movement = prediction.market.line_movement;
    if movement.abs() <= LINE_ALERT_THRESHOLD {
        return;
    }
    let impact = movement_impact(movement);
    actions.push(Action::LineMovementAlert {
        match_label: prediction.match_label.clone(),
        movement,
        impact,
    });
    if impact == MovementImpact::Significant {
        let smart = if prediction.analysis.smart_money_indicator {
            "smart money confirmed"
        } else {
            "no smart money confirmation"
        };
        actions.push(Action::MarketAlert {
            message: format!(
                "Significant line move on {} ({:+.1}%), {}",
                prediction.match_label,
                movement * 100.0,
                smart
            ),
            level: AlertLevel::Warning,
            market_data: alert_data(prediction, assessment, None),
        });
    }
}

pub fn movement_impact(movement: f64) -> MovementImpact {
    let m = movement.abs();
    if m > LINE_SIGNIFICANT {
        MovementImpact::Significant
    } else if m > LINE_MODERATE {
        MovementImpact::Moderate
    } else {
        MovementImpact::Minimal
    }
}

fn push_risk_warning(actions: &mut Vec<Action>, prediction: &Prediction) {
    let risk = &prediction.risk;
    if risk.overall_risk_score <= RISK_WARNING_SCORE && prediction.analysis.risk_level != RiskLevel::High {
        return;
    }
    actions.push(Action::RiskWarning {
        match_label: prediction.match_label.clone(),
        risk_factors: risk_factors(prediction),
        severity: risk_severity(risk.overall_risk_score),
    });
}

pub fn risk_factors(prediction: &Prediction) -> Vec<String> {
    let risk = &prediction.risk;
    let mut out = Vec::new();
    if risk.probability_variance > RISK_FACTOR_VARIANCE {
        out.push("high probability variance".to_string());
    }
    if risk.market_volatility > RISK_FACTOR_VOLATILITY {
        out.push("market volatility".to_string());
    }
    if risk.sharp_money_risk > RISK_FACTOR_SHARP {
        out.push("sharp money risk".to_string());
    }
    if prediction.analysis.market_efficiency > RISK_FACTOR_EFFICIENCY {
        out.push("highly efficient market".to_string());
    }
    out
}

pub fn risk_severity(score: f64) -> Severity {
    if score > SEVERITY_HIGH {
        Severity::High
    } else if score > SEVERITY_MEDIUM {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn alert_data(prediction: &Prediction, assessment: &MatchAssessment, edge: Option<f64>) -> AlertData {
    AlertData {
        match_label: prediction.match_label.clone(),
        filter_score: assessment.score(),
        tier: assessment.tier(),
        grade: assessment.value.grade,
        confidence: prediction.confidence,
        sharp_strength: assessment.sharp.strength,
        overall_risk_score: prediction.risk.overall_risk_score,
        line_movement: prediction.market.line_movement,
        smart_money_indicator: prediction.analysis.smart_money_indicator,
        edge_percentage: edge,
    }
}
