//! Canonical gesture replay check

use crate::config::GestureConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::script::{Scenario, canonical_scenarios};

/// Replays reference touch sequences and compares the classified kinds
pub struct ScenarioCheck {
    config: GestureConfig,
    scenarios: Vec<Scenario>,
}

impl ScenarioCheck {
    /// Built-in scenarios under default thresholds
    pub fn new() -> Self {
        Self {
            config: GestureConfig::default(),
            scenarios: canonical_scenarios(),
        }
    }

    pub fn with_scenarios(config: GestureConfig, scenarios: Vec<Scenario>) -> Self {
        Self { config, scenarios }
    }
}

impl Default for ScenarioCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn names(kinds: &[crate::gesture::GestureKind]) -> String {
    if kinds.is_empty() {
        return "nothing".to_string();
    }
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SystemCheck for ScenarioCheck {
    fn name(&self) -> &'static str {
        "Gesture scenarios"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Classifies reference touch sequences on a fresh engine")
    }

    fn check(&self) -> CheckResult {
        if self.scenarios.is_empty() {
            return CheckResult::warn("No scenarios to replay");
        }

        let mut details = Vec::new();
        let mut failed = 0;

        for scenario in &self.scenarios {
            let produced = scenario.run(&self.config);
            if produced == scenario.expected {
                details.push(format!("  ✓ {}: {}", scenario.name, names(&produced)));
            } else {
                failed += 1;
                details.push(format!(
                    "  ✗ {}: expected {}, got {}",
                    scenario.name,
                    names(&scenario.expected),
                    names(&produced)
                ));
            }
        }

        let details = details.join("\n");
        if failed > 0 {
            CheckResult::fail(format!(
                "{} of {} scenarios misclassified",
                failed,
                self.scenarios.len()
            ))
            .with_details(details)
        } else {
            CheckResult::pass(format!("{} scenarios classified", self.scenarios.len()))
                .with_details(details)
        }
    }
}
