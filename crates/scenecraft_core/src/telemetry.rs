//! Logging initialisation.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: &[&str] = &[
    "scenecraft",
    "scenecraft_models",
    "scenecraft_pipeline",
    "scenecraft_storage",
];

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to the
/// scenecraft crates and everything else logs at `warn`.
///
/// # Errors
///
/// Returns error if the directive is invalid or a global subscriber is
/// already installed.
pub fn init_logging(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let mut directives: Vec<String> = CRATES
                .iter()
                .map(|name| format!("{name}={default_level}"))
                .collect();
            directives.push("warn".to_string());
            EnvFilter::try_new(directives.join(","))?
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
