//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Human-readable output in development,
/// JSON elsewhere; always on stderr so command output on stdout stays clean.
pub fn init_logging(app_env: &str, level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(parse_level(level))?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    if is_dev_env(app_env) {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

fn parse_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn is_dev_env(app_env: &str) -> bool {
    matches!(
        app_env.trim().to_ascii_lowercase().as_str(),
        "" | "dev" | "development" | "local"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(parse_level("DEBUG"), "debug");
        assert_eq!(parse_level(" warning "), "warn");
        assert_eq!(parse_level(""), "info");
        assert_eq!(parse_level("verbose"), "info");
    }

    #[test]
    fn dev_envs() {
        assert!(is_dev_env(""));
        assert!(is_dev_env("Local"));
        assert!(!is_dev_env("production"));
    }
}
