//! Test suites for the hive envelope model.
