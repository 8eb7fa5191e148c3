//! Log initialisation for the client binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Set to `1` or `true` to log JSON lines instead of text.
pub const LOG_JSON_ENV: &str = "ALFA_LOG_JSON";

/// Installs the global subscriber: `RUST_LOG` filtering (default `info`),
/// written to stderr so stdout stays free for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool(LOG_JSON_ENV) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn env_bool(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_bool(value), "{value}");
        }
        for value in ["", "0", "false", "off", "2"] {
            assert!(!parse_bool(value), "{value}");
        }
    }
}
