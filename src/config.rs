use std::env;

const DEFAULT_LOG: &str = "info,signal_fusion=debug";
const DEFAULT_SYNTH_MATCHES: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_directive: String,
    pub synth_matches: usize,
    pub seed: Option<u64>,
    pub pretty: bool,
    pub parallel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directive: DEFAULT_LOG.to_string(),
            synth_matches: DEFAULT_SYNTH_MATCHES,
            seed: None,
            pretty: true,
            parallel: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        Self {
            log_directive: lookup("SIGNAL_FUSION_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(d.log_directive),
            synth_matches: lookup("SIGNAL_FUSION_SYNTH_MATCHES")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(d.synth_matches)
                .clamp(1, 500),
            seed: lookup("SIGNAL_FUSION_SEED").and_then(|val| val.trim().parse::<u64>().ok()),
            pretty: lookup("SIGNAL_FUSION_PRETTY")
                .map(|val| parse_flag(&val))
                .unwrap_or(d.pretty),
            parallel: lookup("SIGNAL_FUSION_PARALLEL")
                .map(|val| parse_flag(&val))
                .unwrap_or(d.parallel),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn overrides_are_parsed_and_clamped() {
        let vars = HashMap::from([
            ("SIGNAL_FUSION_SYNTH_MATCHES", "9000"),
            ("SIGNAL_FUSION_SEED", "42"),
            ("SIGNAL_FUSION_PRETTY", "no"),
            ("SIGNAL_FUSION_PARALLEL", "YES"),
            ("SIGNAL_FUSION_LOG", "warn"),
        ]);
        let cfg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.synth_matches, 500);
        assert_eq!(cfg.seed, Some(42));
        assert!(!cfg.pretty);
        assert!(cfg.parallel);
        assert_eq!(cfg.log_directive, "warn");
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = AppConfig::from_lookup(|k| match k {
            "SIGNAL_FUSION_SYNTH_MATCHES" => Some("lots".to_string()),
            "SIGNAL_FUSION_SEED" => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(cfg.synth_matches, DEFAULT_SYNTH_MATCHES);
        assert_eq!(cfg.seed, None);
    }
}
