//! Configuration types.

use crate::error::{ConfigError, Result};

/// Onboarding flow configuration.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Application name for identification.
    pub name: String,
    /// Maximum retained step transitions per session.
    pub transition_history_cap: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            name: "report-onboard".to_string(),
            transition_history_cap: 100,
        }
    }
}

impl FlowConfig {
    /// Build a config from `REPORT_ONBOARD_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("REPORT_ONBOARD_NAME") {
            config.name = name;
        }

        if let Ok(raw) = std::env::var("REPORT_ONBOARD_HISTORY_CAP") {
            config.transition_history_cap =
                raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "REPORT_ONBOARD_HISTORY_CAP".to_string(),
                    message: format!("expected a non-negative integer, got {raw:?}"),
                })?;
        }

        Ok(config)
    }
}
