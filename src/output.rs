//! Global output configuration and utilities.
//!
//! Routing rules for the harness:
//!
//! - Operation results (`version` lines, usage hints) go to stdout
//! - The command echo and status lines go to stderr and honor `--quiet`
//! - Warnings and errors always go to stderr
//! - Colors are disabled via `--no-color` or the NO_COLOR variable

use std::sync::OnceLock;

/// Global output configuration, set once from the CLI flags.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// Called once at startup; later calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for the command echo and other progress information.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a warning message to stderr (always shown, even in quiet mode).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_not_quiet() {
        assert!(!OutputConfig::default().quiet);
    }

    #[test]
    fn test_explicit_config_fields_are_kept() {
        let config = OutputConfig {
            quiet: true,
            no_color: true,
        };
        assert!(config.quiet);
        assert!(config.no_color);
    }
}
