use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Configuration from dayplan.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// First day of the calendar week: "sunday" (default) or "monday"
    #[serde(default = "default_week_start")]
    pub week_start: String,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            week_start: default_week_start(),
            ui: UiConfig::default(),
        }
    }
}

fn default_week_start() -> String {
    "sunday".to_string()
}

impl PlannerConfig {
    /// Resolve the configured week start. Anything other than "monday" falls
    /// back to Sunday, the default.
    pub fn week_start_day(&self) -> Weekday {
        if self.week_start.trim().eq_ignore_ascii_case("monday") {
            Weekday::Mon
        } else {
            Weekday::Sun
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, keyed by slot name (hex strings like "#FF4444")
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-category bar colors, keyed by category label ("To Do", ...)
    #[serde(default)]
    pub category_colors: HashMap<String, String>,
}
