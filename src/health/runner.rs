//! Runs a suite of health checks and tallies the outcome

use std::time::Instant;

use tracing::debug;

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Check name and result, in run order
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Most severe status in the report
    pub fn worst_status(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(_, result)| result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = warnings only
    pub fn exit_code(&self) -> i32 {
        match self.worst_status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }

    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check, _)| check == name)
            .map(|(_, result)| result)
    }
}

/// Builder that runs checks in the order they were added
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport {
            results: Vec::with_capacity(self.checks.len()),
            total: 0,
            passed: 0,
            warned: 0,
            failed: 0,
        };

        for check in self.checks {
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());
            debug!(
                check = check.name(),
                status = result.status.label(),
                duration = ?result.duration,
                "health check finished"
            );

            match result.status {
                CheckStatus::Pass => report.passed += 1,
                CheckStatus::Warn => report.warned += 1,
                CheckStatus::Fail => report.failed += 1,
            }
            report.results.push((check.name().to_string(), result));
        }

        report.total = report.results.len();
        report
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new()
    }
}
