//! Test suites for the hive data source.

mod support;
