//! Test suites for the collector daemon.

mod support;
