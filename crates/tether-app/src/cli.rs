//! CLI argument definitions for the Tether application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Tether: conversation log core for an assistive chat application.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Owner (MND patient) name to log in as.
    #[arg(short = 'o', long = "owner", default_value = "MND Patient")]
    pub owner: String,

    /// History CSV to load on startup and export next to on exit.
    #[arg(long = "history")]
    pub history: Option<PathBuf>,

    /// File containing the completion API token.
    #[arg(long = "api-key-file")]
    pub api_key_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TETHER_CONFIG env var > ~/.tether/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TETHER_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the history CSV path.
    ///
    /// Priority: --history flag > config file value.
    pub fn resolve_history_path(&self, config_path: &str) -> PathBuf {
        self.history
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_path))
    }
}

fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".tether").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs::parse_from(["tether"])
    }

    #[test]
    fn test_defaults() {
        let args = args();
        assert_eq!(args.owner, "MND Patient");
        assert!(args.config.is_none());
        assert!(args.history.is_none());
        assert!(args.api_key_file.is_none());
    }

    #[test]
    fn test_api_key_file_flag() {
        let args = CliArgs::parse_from(["tether", "--api-key-file", "/tmp/token.txt"]);
        assert_eq!(args.api_key_file, Some(PathBuf::from("/tmp/token.txt")));
    }

    #[test]
    fn test_flag_overrides_config_log_level() {
        let args = CliArgs::parse_from(["tether", "--log-level", "debug"]);
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert_eq!(self::args().resolve_log_level("warn"), "warn");
    }

    #[test]
    fn test_history_falls_back_to_config() {
        let args = args();
        assert_eq!(
            args.resolve_history_path("./chat_history.csv"),
            PathBuf::from("./chat_history.csv")
        );

        let args = CliArgs::parse_from(["tether", "--history", "/tmp/h.csv"]);
        assert_eq!(
            args.resolve_history_path("./chat_history.csv"),
            PathBuf::from("/tmp/h.csv")
        );
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = CliArgs::parse_from(["tether", "-c", "/etc/tether.toml"]);
        assert_eq!(
            args.resolve_config_path(),
            PathBuf::from("/etc/tether.toml")
        );
    }
}
