//! Integration tests for the health check system

use gesture_engine::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(result.status.is_ok(), "Config check failed: {}", result.message);
    assert!(result.details.is_some());
}

#[test]
fn test_scenario_check() {
    let result = ScenarioCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Scenario check failed: {}\n{}",
        result.message,
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::with_profiles(vec!["debug"]))
        .add_check(ScenarioCheck::new())
        .run();

    assert_eq!(report.total, 2);
    assert_eq!(report.passed + report.warned + report.failed, report.total);
    assert!(report.result("Gesture scenarios").is_some());
}

#[test]
fn test_report_lists_every_check() {
    let report = health::run_all_checks();
    let text = health::format_report(&report);

    assert!(text.contains("Configuration"));
    assert!(text.contains("Gesture scenarios"));
    assert!(text.contains("Summary"));
}
