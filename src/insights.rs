use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filter::DecisionTier;
use crate::prediction::Prediction;
use crate::synth::{MatchAssessment, assess};

const INNOVATION_THRESHOLD: f64 = 90.0;
const HIGH_EDGE_PCT: f64 = 15.0;

const WARN_PORTFOLIO_RISK: f64 = 0.4;
const WARN_EFFICIENCY: f64 = 95.0;
const WARN_ALIGNMENT: f64 = 0.3;
const WARN_TOTAL_EDGE: f64 = 20.0;
const OPP_ALIGNMENT: f64 = 0.7;
const OPP_EFFICIENCY: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    AggressiveGrowth,
    SelectiveScaling,
    CarefulExecution,
    Monitor,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AggressiveGrowth => "AGGRESSIVE_GROWTH",
            Strategy::SelectiveScaling => "SELECTIVE_SCALING",
            Strategy::CarefulExecution => "CAREFUL_EXECUTION",
            Strategy::Monitor => "MONITOR",
        }
    }

    pub fn allocation(&self) -> &'static str {
        match self {
            Strategy::AggressiveGrowth => {
                "60% DOMINATE positions, 30% EXECUTE positions, 10% reserve"
            }
            Strategy::SelectiveScaling => {
                "40% top-conviction positions, 30% EXECUTE positions, 30% reserve"
            }
            Strategy::CarefulExecution => "25% EXECUTE positions, 75% reserve",
            Strategy::Monitor => "100% reserve until a stronger slate appears",
        }
    }
}

pub fn recommend_strategy(dominate: usize, execute: usize) -> Strategy {
    if dominate > 2 {
        Strategy::AggressiveGrowth
    } else if dominate > 0 || execute > 1 {
        Strategy::SelectiveScaling
    } else if execute > 0 {
        Strategy::CarefulExecution
    } else {
        Strategy::Monitor
    }
}

// One summary per batch. Percent-scaled fields are 0-100; `sharp_money_alignment`,
// `average_risk_score` and `sharp_confidence_index` stay fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicInsights {
    pub matches: usize,
    pub total_opportunities: usize,
    pub market_dominance_score: f64,
    pub innovation_index: f64,
    pub risk_management_score: f64,
    pub sharp_money_alignment: f64,
    pub total_edge_percentage: f64,
    pub average_market_efficiency: f64,
    pub average_risk_score: f64,
    pub value_opportunity_count: usize,
    pub high_edge_bets: usize,
    pub domination_count: usize,
    pub execution_count: usize,
    pub buffett_score: f64,
    pub meta_scaling_score: f64,
    pub sharp_confidence_index: f64,
    pub intelligence_rating: f64,
    pub recommended_strategy: Strategy,
    pub allocation_suggestion: String,
    pub risk_warnings: Vec<String>,
    pub opportunities: Vec<String>,
}

impl StrategicInsights {
    pub fn empty() -> Self {
        Self {
            matches: 0,
            total_opportunities: 0,
            market_dominance_score: 0.0,
            innovation_index: 0.0,
            risk_management_score: 0.0,
            sharp_money_alignment: 0.0,
            total_edge_percentage: 0.0,
            average_market_efficiency: 0.0,
            average_risk_score: 0.0,
            value_opportunity_count: 0,
            high_edge_bets: 0,
            domination_count: 0,
            execution_count: 0,
            buffett_score: 0.0,
            meta_scaling_score: 0.0,
            sharp_confidence_index: 0.0,
            intelligence_rating: 0.0,
            recommended_strategy: Strategy::Monitor,
            allocation_suggestion: Strategy::Monitor.allocation().to_string(),
            risk_warnings: Vec::new(),
            opportunities: Vec::new(),
        }
    }
}

pub fn strategic_insights(predictions: &[Prediction]) -> StrategicInsights {
    let assessments: Vec<MatchAssessment> = predictions.iter().map(assess).collect();
    summarize(predictions, &assessments)
}

/// `assessments[i]` must belong to `predictions[i]`; a longer slice is cut to the shorter one.
pub fn summarize(predictions: &[Prediction], assessments: &[MatchAssessment]) -> StrategicInsights {
    let len = predictions.len().min(assessments.len());
    if len != predictions.len() || len != assessments.len() {
        warn!(
            target: "signal_fusion::insights",
            predictions = predictions.len(),
            assessments = assessments.len(),
            "mismatched batch, summarizing the common prefix"
        );
    }
    let (predictions, assessments) = (&predictions[..len], &assessments[..len]);
    if predictions.is_empty() {
        warn!(target: "signal_fusion::insights", "empty batch, returning zeroed summary");
        return StrategicInsights::empty();
    }

    let n = predictions.len() as f64;
    let count_tier = |tier: DecisionTier| assessments.iter().filter(|a| a.tier() == tier).count();
    let dominate = count_tier(DecisionTier::Dominate);
    let execute = count_tier(DecisionTier::Execute);
    let total_opportunities = dominate + execute;

    let innovative = predictions
        .iter()
        .filter(|p| p.analysis.innovation_score > INNOVATION_THRESHOLD)
        .count();
    let aligned = predictions
        .iter()
        .filter(|p| p.analysis.smart_money_indicator)
        .count();
    let buy_grades = assessments.iter().filter(|a| a.value.grade.is_buy()).count();

    let average_risk_score = mean(predictions, |p| p.risk.overall_risk_score);
    let average_market_efficiency = mean(predictions, |p| p.analysis.market_efficiency);
    let sharp_confidence_index = mean(predictions, |p| p.market.sharp_confidence);
    let sharp_money_alignment = aligned as f64 / n;

    let edges = predictions
        .iter()
        .flat_map(|p| p.value_opportunities.iter().map(|v| v.edge_percentage));
    let (value_opportunity_count, total_edge_percentage, high_edge_bets) =
        edges.fold((0usize, 0.0_f64, 0usize), |(count, total, high), e| {
            (count + 1, total + e, high + usize::from(e > HIGH_EDGE_PCT))
        });

    let strategy = recommend_strategy(dominate, execute);

    let mut risk_warnings = Vec::new();
    if average_risk_score > WARN_PORTFOLIO_RISK {
        risk_warnings.push(format!(
            "Portfolio risk elevated: average risk score {:.2}",
            average_risk_score
        ));
    }
    if average_market_efficiency > WARN_EFFICIENCY {
        risk_warnings.push(format!(
            "Markets highly efficient ({:.1}): little edge left to exploit",
            average_market_efficiency
        ));
    }
    if sharp_money_alignment < WARN_ALIGNMENT {
        risk_warnings.push(format!(
            "Low sharp money alignment ({:.0}%): model disagrees with informed flow",
            sharp_money_alignment * 100.0
        ));
    }
    if total_edge_percentage < WARN_TOTAL_EDGE {
        risk_warnings.push(format!(
            "Thin slate: total edge only {:.1}%",
            total_edge_percentage
        ));
    }

    let mut opportunities = Vec::new();
    if dominate > 0 {
        opportunities.push(format!("{dominate} DOMINATE-tier matches available"));
    }
    if high_edge_bets > 0 {
        opportunities.push(format!(
            "{high_edge_bets} value bets carry more than {HIGH_EDGE_PCT:.0}% edge"
        ));
    }
    if sharp_money_alignment > OPP_ALIGNMENT {
        opportunities.push(format!(
            "Strong sharp money alignment ({:.0}%)",
            sharp_money_alignment * 100.0
        ));
    }
    if average_market_efficiency < OPP_EFFICIENCY {
        opportunities.push(format!(
            "Inefficient markets ({:.1}) leave room for an information edge",
            average_market_efficiency
        ));
    }

    StrategicInsights {
        matches: predictions.len(),
        total_opportunities,
        market_dominance_score: ((2 * dominate + execute) * 10) as f64,
        innovation_index: innovative as f64 / n * 100.0,
        risk_management_score: 100.0 * (1.0 - average_risk_score),
        sharp_money_alignment,
        total_edge_percentage,
        average_market_efficiency,
        average_risk_score,
        value_opportunity_count,
        high_edge_bets,
        domination_count: dominate,
        execution_count: execute,
        buffett_score: buy_grades as f64 / n * 100.0,
        meta_scaling_score: total_opportunities as f64 / n * 100.0,
        sharp_confidence_index,
        intelligence_rating: 0.5 * (100.0 - average_market_efficiency)
            + 0.5 * (sharp_money_alignment * 100.0),
        recommended_strategy: strategy,
        allocation_suggestion: strategy.allocation().to_string(),
        risk_warnings,
        opportunities,
    }
}

fn mean(predictions: &[Prediction], f: impl Fn(&Prediction) -> f64) -> f64 {
    predictions.iter().map(f).sum::<f64>() / predictions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_ladder() {
        assert_eq!(recommend_strategy(3, 0), Strategy::AggressiveGrowth);
        assert_eq!(recommend_strategy(2, 0), Strategy::SelectiveScaling);
        assert_eq!(recommend_strategy(0, 2), Strategy::SelectiveScaling);
        assert_eq!(recommend_strategy(0, 1), Strategy::CarefulExecution);
        assert_eq!(recommend_strategy(0, 0), Strategy::Monitor);
    }

    #[test]
    fn mismatched_assessments_use_common_prefix() {
        let batch = crate::synthetic::SyntheticFeed::new(Some(5)).batch(4);
        let assessments: Vec<MatchAssessment> = batch.iter().map(assess).collect();

        let short = summarize(&batch, &assessments[..2]);
        assert_eq!(short, strategic_insights(&batch[..2]));
        assert_eq!(short.matches, 2);

        let long = summarize(&batch[..3], &assessments);
        assert_eq!(long, strategic_insights(&batch[..3]));

        assert_eq!(summarize(&batch, &[]), StrategicInsights::empty());
    }

    #[test]
    fn empty_batch_is_zeroed() {
        let s = strategic_insights(&[]);
        assert_eq!(s, StrategicInsights::empty());
        assert!(s.risk_warnings.is_empty());
        assert_eq!(s.recommended_strategy, Strategy::Monitor);
    }
}
