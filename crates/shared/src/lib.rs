pub mod domain;
pub mod error;
pub mod forms;
pub mod kpi;

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
