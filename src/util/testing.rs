use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::BranchDescriptor;

static TEST_SETUP: Once = Once::new();

/// Install the test logging subscriber once per process.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // RUST_LOG wins, otherwise log everything from this crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("branchtree=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

/// Branch listing used across tests:
///
/// ```text
/// $/Project/Main
/// ├── $/Project/Dev
/// │   └── $/Project/Feature
/// └── $/Project/Release
/// $/Other/Main
/// ```
pub fn sample_branches() -> Vec<BranchDescriptor> {
    vec![
        BranchDescriptor::root("$/Project/Main"),
        BranchDescriptor::child("$/Project/Dev", "$/Project/Main"),
        BranchDescriptor::child("$/Project/Feature", "$/Project/Dev"),
        BranchDescriptor::child("$/Project/Release", "$/Project/Main"),
        BranchDescriptor::root("$/Other/Main"),
    ]
}
