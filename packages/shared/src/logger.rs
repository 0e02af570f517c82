//! Logger setup built on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Workspace crates whose logs follow the binary's default level.
const WORKSPACE_TARGETS: [&str; 2] = ["kaiwa_core", "kaiwa_shared"];

/// Build the filter directives used when `RUST_LOG` is not set.
///
/// `bin_name` is the Cargo binary name (`kebab-case`); tracing targets use
/// the crate name, so hyphens are mapped to underscores.
pub fn default_directives(bin_name: &str, default_level: &str) -> String {
    let mut directives = vec![format!("{}={}", bin_name.replace('-', "_"), default_level)];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={default_level}")),
    );
    directives.join(",")
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless; only the first subscriber is installed.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logger already initialized, keeping the existing subscriber");
    }
}
