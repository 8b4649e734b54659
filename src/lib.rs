pub mod action;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod insights;
pub mod portfolio;
pub mod prediction;
pub mod sharp_money;
pub mod synth;
pub mod synthetic;
pub mod value_grade;

pub use action::{Action, ActionKind};
pub use insights::{StrategicInsights, strategic_insights};
pub use portfolio::{BatchEvaluation, evaluate_batch, evaluate_batch_sequential};
pub use prediction::Prediction;

/// Runs the whole engine over one batch: per-match actions in order, then portfolio directives.
pub fn run_engine(predictions: &[Prediction]) -> Vec<Action> {
    evaluate_batch(predictions).into_actions()
}
