use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset, by number of `-v` flags.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        _ => "debug",
    }
}

/// Installs a stderr subscriber so diagnostics never mix with rendered output.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_by_verbosity() {
        assert_eq!(default_level(0), "error");
        assert_eq!(default_level(1), "warn");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(5), "debug");
    }
}
