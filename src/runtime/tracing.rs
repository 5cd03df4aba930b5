/// Initializes structured logging for the whole process.
///
/// Verbosity is controlled through the `RUST_LOG` environment variable:
///
/// - `RUST_LOG=info` — lifecycle milestones and actor failures
/// - `RUST_LOG=debug` — every state transition and queue operation
/// - `RUST_LOG=brigade=debug` — debug for this crate only
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
