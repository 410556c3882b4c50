//! Diagnostics for shortening and expansion.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to binaries. The `responsefile` CLI calls [`init`].

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
///
/// Other crates stay at `error`; this crate reports removal failures and
/// child timeouts at `warn`.
pub const DEFAULT_FILTER: &str = "error,responsefile=warn";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber for the CLI, so log lines never mix with
/// printed arguments.
///
/// # Example
/// ```bash
/// RUST_LOG=responsefile=debug responsefile expand @args.rsp
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
