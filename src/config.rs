use std::env;
use std::time::Duration;

/// Engine tuning, read from `KUTULU_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Turns simulated ahead by the search.
    pub search_depth: usize,
    /// Soft per-turn budget for the search.
    pub time_budget: Duration,
    /// Turns played by the self-play game before stopping.
    pub turn_limit: u32,
    /// Seed for wanderer spawn placement.
    pub seed: u64,
    /// A new wanderer spawns every this many turns; 0 disables spawning.
    pub wanderer_spawn_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 5,
            time_budget: Duration::from_millis(20),
            turn_limit: 200,
            seed: 0,
            wanderer_spawn_interval: 8,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset or unparsable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|val| val.trim().parse::<T>().ok())
        }

        let defaults = Self::default();
        Self {
            search_depth: parsed(&lookup, "KUTULU_SEARCH_DEPTH").unwrap_or(defaults.search_depth),
            time_budget: parsed(&lookup, "KUTULU_TIME_BUDGET_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.time_budget),
            turn_limit: parsed(&lookup, "KUTULU_TURN_LIMIT").unwrap_or(defaults.turn_limit),
            seed: parsed(&lookup, "KUTULU_SEED").unwrap_or(defaults.seed),
            wanderer_spawn_interval: parsed(&lookup, "KUTULU_SPAWN_INTERVAL")
                .unwrap_or(defaults.wanderer_spawn_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_overrides_defaults() {
        let vars = HashMap::from([
            ("KUTULU_SEARCH_DEPTH", "3"),
            ("KUTULU_TIME_BUDGET_MS", " 45 "),
            ("KUTULU_SEED", "99"),
        ]);
        let config = EngineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.time_budget, Duration::from_millis(45));
        assert_eq!(config.seed, 99);
        assert_eq!(config.turn_limit, 200);
        assert_eq!(config.wanderer_spawn_interval, 8);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = EngineConfig::from_lookup(|key| match key {
            "KUTULU_SEARCH_DEPTH" => Some("deep".to_string()),
            "KUTULU_TURN_LIMIT" => Some("-4".to_string()),
            _ => None,
        });
        assert_eq!(config, EngineConfig::default());
    }
}
