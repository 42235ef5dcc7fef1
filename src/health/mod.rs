//! Health checks for the gesture engine
//!
//! Verifies that configuration loads and that reference touch sequences
//! classify as expected. Used by `gesture-replay check` and in CI.
//!
//! # Example
//!
//! ```no_run
//! use gesture_engine::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(ScenarioCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs the full built-in suite
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::ScenarioCheck::new())
        .run()
}
