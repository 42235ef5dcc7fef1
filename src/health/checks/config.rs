//! Configuration health check

use crate::config::{EngineConfig, GestureConfig};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that every profile loads and yields usable thresholds
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(gestures: &GestureConfig) -> String {
    format!(
        "tap {}px/{}ms, double tap {}ms, swipe {}px, flick {}px/{}ms",
        gestures.tap_distance,
        gestures.tap_long_time,
        gestures.double_tap_time,
        gestures.swipe_distance,
        gestures.flick_distance,
        gestures.flick_time
    )
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;

        for profile in &self.profiles {
            match EngineConfig::load(profile) {
                Ok(config) => {
                    details.push(format!("  ✓ '{}': {}", profile, describe(&config.gestures)));
                }
                Err(e) => {
                    details.push(format!("  ✗ '{}': {}", profile, e));
                    failed += 1;
                }
            }
        }

        let config_dir = EngineConfig::find_config_dir();
        match &config_dir {
            Some(dir) => details.push(format!("  ✓ profile files in {}", dir.display())),
            None => details.push("  ⚠ no config directory, built-in defaults in use".to_string()),
        }

        let details = details.join("\n");
        if failed > 0 {
            CheckResult::fail(format!("{} of {} profiles failed", failed, self.profiles.len()))
                .with_details(details)
        } else if config_dir.is_none() {
            CheckResult::warn("Profiles fell back to defaults").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
