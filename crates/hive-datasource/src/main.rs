//! Validates the hive data source configuration and reports readiness.

use std::process::ExitCode;

use hive_datasource::{StructuredHealthReporter, SystemConfigLoader, bootstrap_with};

fn main() -> ExitCode {
    match bootstrap_with(&SystemConfigLoader, &StructuredHealthReporter::new()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
