use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use signal_fusion::config::AppConfig;
use signal_fusion::feed::load_predictions;
use signal_fusion::insights::summarize;
use signal_fusion::synthetic::SyntheticFeed;
use signal_fusion::{Action, StrategicInsights, evaluate_batch, evaluate_batch_sequential};

#[derive(Serialize)]
struct Report<'a> {
    matches: usize,
    action_counts: BTreeMap<&'static str, usize>,
    actions: Vec<&'a Action>,
    insights: StrategicInsights,
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

// Usage: fusion_eval [batch.json]
// Without a path a synthetic slate is generated (SIGNAL_FUSION_SYNTH_MATCHES, SIGNAL_FUSION_SEED).
fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env();
    init_logging(&cfg.log_directive);

    let predictions = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_predictions(&path)
            .with_context(|| format!("load predictions from {}", path.display()))?,
        None => {
            info!(matches = cfg.synth_matches, seed = ?cfg.seed, "generating synthetic slate");
            SyntheticFeed::new(cfg.seed).batch(cfg.synth_matches)
        }
    };

    let eval = if cfg.parallel {
        evaluate_batch(&predictions)
    } else {
        evaluate_batch_sequential(&predictions)
    };
    let assessments: Vec<_> = eval.matches.iter().map(|m| m.assessment.clone()).collect();
    let insights = summarize(&predictions, &assessments);

    let mut action_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for action in eval.actions() {
        *action_counts.entry(action.kind().as_str()).or_insert(0) += 1;
    }

    let report = Report {
        matches: predictions.len(),
        action_counts,
        actions: eval.actions().collect(),
        insights,
    };

    let out = if cfg.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serialize report")?;
    println!("{out}");

    Ok(())
}
