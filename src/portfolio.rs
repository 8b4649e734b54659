use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::Action;
use crate::prediction::Prediction;
use crate::synth::{Synthesis, assess, synthesize};

const DOMINATION_MODE_MIN: usize = 1;
const MARKET_DOMINATION_MIN_VALUE: f64 = 50.0;
const META_SCALING_MIN: usize = 2;

pub const MOVE_PORTFOLIO_DOMINATION: &str = "PORTFOLIO_DOMINATION_MODE";
pub const MOVE_META_SCALING: &str = "META_SCALING_OPPORTUNITY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub domination_opportunities: usize,
    pub total_value_score: f64,
    pub strong_opportunities: usize,
}

pub fn fold_totals(syntheses: &[Synthesis]) -> PortfolioTotals {
    syntheses
        .iter()
        .fold(PortfolioTotals::default(), |mut acc, s| {
            let c = s.contribution;
            if c.domination {
                acc.domination_opportunities += 1;
            }
            acc.total_value_score += c.value_score;
            if c.strong {
                acc.strong_opportunities += 1;
            }
            acc
        })
}

pub fn portfolio_actions(totals: &PortfolioTotals) -> Vec<Action> {
    let mut out = Vec::new();

    if totals.domination_opportunities > DOMINATION_MODE_MIN {
        out.push(Action::StrategicMove {
            action: MOVE_PORTFOLIO_DOMINATION.to_string(),
            reasoning: format!(
                "{} DOMINATE matches with BUY_HEAVY grades; concentrate on the highest-edge slate",
                totals.domination_opportunities
            ),
            expected_roi: totals.total_value_score / totals.domination_opportunities as f64,
        });
    }

    if totals.total_value_score > MARKET_DOMINATION_MIN_VALUE {
        out.push(Action::MarketDomination {
            opportunities: totals.strong_opportunities,
            total_edge: totals.total_value_score,
        });
    }

    if totals.strong_opportunities > META_SCALING_MIN {
        out.push(Action::StrategicMove {
            action: MOVE_META_SCALING.to_string(),
            reasoning: format!(
                "{} DOMINATE/EXECUTE matches in one slate; scale stake sizing across them",
                totals.strong_opportunities
            ),
            expected_roi: totals.total_value_score / totals.strong_opportunities as f64,
        });
    }

    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEvaluation {
    pub matches: Vec<Synthesis>,
    pub totals: PortfolioTotals,
    pub portfolio: Vec<Action>,
}

impl BatchEvaluation {
    fn from_syntheses(matches: Vec<Synthesis>) -> Self {
        let totals = fold_totals(&matches);
        let portfolio = portfolio_actions(&totals);
        info!(
            target: "signal_fusion::portfolio",
            matches = matches.len(),
            dominations = totals.domination_opportunities,
            strong = totals.strong_opportunities,
            total_value = totals.total_value_score,
            portfolio_actions = portfolio.len(),
            "batch evaluated"
        );
        Self {
            matches,
            totals,
            portfolio,
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.matches
            .iter()
            .flat_map(|m| m.actions.iter())
            .chain(self.portfolio.iter())
    }

    pub fn into_actions(self) -> Vec<Action> {
        let mut out: Vec<Action> = self.matches.into_iter().flat_map(|m| m.actions).collect();
        out.extend(self.portfolio);
        out
    }
}

pub fn evaluate_batch(predictions: &[Prediction]) -> BatchEvaluation {
    let matches: Vec<Synthesis> = predictions
        .par_iter()
        .map(|p| synthesize(p, assess(p)))
        .collect();
    BatchEvaluation::from_syntheses(matches)
}

pub fn evaluate_batch_sequential(predictions: &[Prediction]) -> BatchEvaluation {
    let matches: Vec<Synthesis> = predictions.iter().map(|p| synthesize(p, assess(p))).collect();
    BatchEvaluation::from_syntheses(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_directives_for_quiet_totals() {
        let totals = PortfolioTotals {
            domination_opportunities: 1,
            total_value_score: 50.0,
            strong_opportunities: 2,
        };
        assert!(portfolio_actions(&totals).is_empty());
    }

    #[test]
    fn all_directives_in_order() {
        let totals = PortfolioTotals {
            domination_opportunities: 2,
            total_value_score: 90.0,
            strong_opportunities: 3,
        };
        let actions = portfolio_actions(&totals);
        assert_eq!(actions.len(), 3);
        match &actions[0] {
            Action::StrategicMove { action, expected_roi, .. } => {
                assert_eq!(action, MOVE_PORTFOLIO_DOMINATION);
                assert!((expected_roi - 45.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            actions[1],
            Action::MarketDomination {
                opportunities: 3,
                total_edge: 90.0
            }
        );
        match &actions[2] {
            Action::StrategicMove { action, expected_roi, .. } => {
                assert_eq!(action, MOVE_META_SCALING);
                assert!((expected_roi - 30.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_batch_has_no_actions() {
        let eval = evaluate_batch(&[]);
        assert_eq!(eval.totals, PortfolioTotals::default());
        assert!(eval.into_actions().is_empty());
    }
}
