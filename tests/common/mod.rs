#![allow(dead_code)]

use crnk_query::{FilterOperator, FilterSpec};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness. Set `RUST_LOG=crnk_query=trace` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn filter_array_user() -> Vec<FilterSpec> {
    vec![
        FilterSpec::new("user.number", "30000", FilterOperator::Ge),
        FilterSpec::new("user.name", "Emil", FilterOperator::Like),
        FilterSpec::new("user.contact.email", "Emil@", FilterOperator::Like),
    ]
}

pub fn filter_array_client() -> Vec<FilterSpec> {
    vec![
        FilterSpec::equals("client.id", "16512"),
        FilterSpec::new("client.name", "Jag", FilterOperator::Like),
    ]
}

pub const USER_FILTER: &str = r#"{"AND": [{"user": {"GE": {"number": "30000"}}}, {"user": {"LIKE": {"name": "Emil%"}}}, {"user": {"contact": {"LIKE": {"email": "Emil@%"}}}}]}"#;
