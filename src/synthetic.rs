use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::prediction::{
    ConfidenceLevel, MarketSignals, MatchAnalysis, OutcomeProbs, Prediction, RiskLevel,
    RiskMetrics, ValueOpportunity,
};

const TEAMS: &[&str] = &[
    "Arsenal", "Chelsea", "Liverpool", "Man City", "Man United", "Tottenham", "Newcastle",
    "Aston Villa", "Real Madrid", "Barcelona", "Atletico", "Bayern", "Dortmund", "Leipzig",
    "Inter", "Milan", "Juventus", "Napoli", "PSG", "Marseille",
];

const POSITIONS: &[&str] = &["leader", "challenger", "contrarian", "follower"];

// Bookmaker overround applied to implied probabilities.
const BOOK_MARGIN: f64 = 1.03;
const MIN_EDGE_RATIO: f64 = 1.1;

pub struct SyntheticFeed {
    rng: StdRng,
}

impl SyntheticFeed {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn batch(&mut self, n: usize) -> Vec<Prediction> {
        (0..n).map(|_| self.next_prediction()).collect()
    }

    pub fn next_prediction(&mut self) -> Prediction {
        let rng = &mut self.rng;

        let mut teams = TEAMS.choose_multiple(rng, 2);
        let home_team = teams.next().copied().unwrap_or("Home");
        let away_team = teams.next().copied().unwrap_or("Away");

        let probabilities = normalize(
            rng.gen_range(0.15..0.65),
            rng.gen_range(0.15..0.35),
            rng.gen_range(0.10..0.55),
        );
        let implied = normalize(
            (probabilities.home + rng.gen_range(-0.08..0.08)).max(0.02),
            (probabilities.draw + rng.gen_range(-0.05..0.05)).max(0.02),
            (probabilities.away + rng.gen_range(-0.08..0.08)).max(0.02),
        );
        let sharp_odds = OutcomeProbs {
            home: 1.0 / (implied.home * BOOK_MARGIN),
            draw: 1.0 / (implied.draw * BOOK_MARGIN),
            away: 1.0 / (implied.away * BOOK_MARGIN),
        };

        let confidence = rng.gen_range(0.45..0.97);
        let sharp_confidence = rng.gen_range(0.35..0.95);
        let line_movement = rng.gen_range(-0.30..0.30);

        let overall_risk_score = rng.gen_range(0.05..0.70);
        let risk = RiskMetrics {
            probability_variance: rng.gen_range(0.0..0.25),
            market_volatility: rng.gen_range(0.0..0.25),
            confidence_spread: rng.gen_range(0.0..0.20),
            sharp_money_risk: rng.gen_range(0.0..0.60),
            overall_risk_score,
        };

        let value_opportunities = value_opportunities(&probabilities, &sharp_odds);
        let risk_level = if overall_risk_score > 0.5 {
            RiskLevel::High
        } else if overall_risk_score > 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        let value_detection = if value_opportunities.is_empty() {
            "none"
        } else {
            "detected"
        };

        let (label, prediction) = match argmax(&probabilities) {
            0 => ("Home Win", home_team),
            1 => ("Draw", "Draw"),
            _ => ("Away Win", away_team),
        };

        Prediction {
            match_label: format!("{home_team} vs {away_team}"),
            prediction: if label == "Draw" {
                label.to_string()
            } else {
                format!("{label} ({prediction})")
            },
            confidence,
            probabilities,
            market: MarketSignals {
                implied,
                sharp_odds,
                sharp_confidence,
                line_movement,
            },
            risk,
            analysis: MatchAnalysis {
                innovation_score: rng.gen_range(60.0..100.0),
                market_position: POSITIONS.choose(rng).copied().unwrap_or("follower").to_string(),
                risk_level,
                execution_confidence: (confidence * 100.0 + rng.gen_range(-10.0..10.0)).clamp(0.0, 100.0),
                market_efficiency: rng.gen_range(75.0..99.0),
                value_detection: value_detection.to_string(),
                line_movement_impact: line_movement.abs() * sharp_confidence,
                smart_money_indicator: rng.gen_bool(0.4),
            },
            value_opportunities,
        }
    }
}

fn normalize(home: f64, draw: f64, away: f64) -> OutcomeProbs {
    let sum = (home + draw + away).max(1e-9);
    OutcomeProbs {
        home: home / sum,
        draw: draw / sum,
        away: away / sum,
    }
}

fn argmax(p: &OutcomeProbs) -> usize {
    if p.home >= p.draw && p.home >= p.away {
        0
    } else if p.draw >= p.away {
        1
    } else {
        2
    }
}

// Listed in home/draw/away order, priced against the sharp book.
fn value_opportunities(model: &OutcomeProbs, odds: &OutcomeProbs) -> Vec<ValueOpportunity> {
    [
        ("home", model.home, odds.home),
        ("draw", model.draw, odds.draw),
        ("away", model.away, odds.away),
    ]
    .into_iter()
    .filter_map(|(outcome, m, odd)| {
        let implied = if odd > 0.0 { 1.0 / odd } else { 0.0 };
        if m <= implied * MIN_EDGE_RATIO {
            return None;
        }
        let edge = (m - implied) / implied;
        Some(ValueOpportunity {
            outcome: outcome.to_string(),
            edge_percentage: edge * 100.0,
            model_probability: m,
            market_probability: implied,
            recommended_odds: odd,
            confidence_level: if edge > 0.2 {
                ConfidenceLevel::High
            } else {
                ConfidenceLevel::Medium
            },
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opportunities_keep_outcome_order_and_market_odds() {
        let model = OutcomeProbs { home: 0.39, draw: 0.35, away: 0.26 };
        // implied: home 0.333, draw 0.25, away 0.333
        let odds = OutcomeProbs { home: 3.0, draw: 4.0, away: 3.0 };
        let opps = value_opportunities(&model, &odds);
        assert_eq!(opps.len(), 2);
        assert_eq!(opps[0].outcome, "home");
        assert_eq!(opps[1].outcome, "draw");
        // the draw carries the larger edge but stays second
        assert!(opps[1].edge_percentage > opps[0].edge_percentage);
        assert!((opps[0].edge_percentage - 17.0).abs() < 1e-9);
        assert!((opps[1].edge_percentage - 40.0).abs() < 1e-9);
        assert_eq!(opps[0].recommended_odds, 3.0);
        assert_eq!(opps[0].confidence_level, ConfidenceLevel::Medium);
        assert_eq!(opps[1].confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn seeded_feed_is_reproducible() {
        let a = SyntheticFeed::new(Some(7)).batch(5);
        let b = SyntheticFeed::new(Some(7)).batch(5);
        assert_eq!(a, b);
    }

    #[test]
    fn generated_records_are_well_formed() {
        let batch = SyntheticFeed::new(Some(11)).batch(50);
        for p in &batch {
            let sum = p.probabilities.home + p.probabilities.draw + p.probabilities.away;
            assert!((sum - 1.0).abs() < 1e-9);
            assert!((0.0..=1.0).contains(&p.confidence));
            assert!((0.0..=100.0).contains(&p.analysis.market_efficiency));
            assert!(p.market.sharp_odds.min() > 1.0);
            assert!(p.value_opportunities.iter().all(|v| v.edge_percentage > 10.0));
        }
    }
}
