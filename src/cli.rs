//! CLI argument parsing with clap

use crate::config::{Config, SubmitPolicy};
use clap::Parser;
use std::path::PathBuf;

/// Driver Onboarding - Multi-step registration wizard
///
/// Collects a driver's personal details, address and payment information
/// step by step, validating each step before moving on. Without arguments
/// the interactive terminal wizard starts; with `--script` the wizard is
/// driven by a file of recorded actions.
#[derive(Parser, Debug)]
#[command(name = "driver-onboarding")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Script of wizard actions to replay (TOML or JSON)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Write the submitted record to this JSON file
    #[arg(short = 'o', long)]
    pub submit_to: Option<PathBuf>,

    /// Submit-time validation:
    /// - last-step: validate only the final step (default)
    /// - full-record: validate every field, return to the first invalid step
    #[arg(long, value_enum)]
    pub submit_policy: Option<SubmitPolicy>,

    /// Clear a step's errors when navigating back from it
    #[arg(long)]
    pub clear_errors_on_back: bool,

    /// UI language (en, zh-CN)
    #[arg(long)]
    pub locale: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub sample_config: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(policy) = self.submit_policy {
            config.submit_policy = policy;
        }
        if self.clear_errors_on_back {
            config.clear_errors_on_back = true;
        }
        if let Some(ref path) = self.submit_to {
            config.submission_file = Some(path.clone());
        }
        if let Some(ref locale) = self.locale {
            config.locale = Some(locale.clone());
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "driver-onboarding",
            "--script",
            "run.toml",
            "-o",
            "out.json",
            "--submit-policy",
            "full-record",
            "--clear-errors-on-back",
        ]);
        assert_eq!(cli.script, Some(PathBuf::from("run.toml")));
        let config = cli.to_config();
        assert_eq!(config.submit_policy, SubmitPolicy::FullRecord);
        assert!(config.clear_errors_on_back);
        assert_eq!(config.submission_file, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_cli_overrides_file_config() {
        let cli = Cli::parse_from(["driver-onboarding", "-C", "Config/fleet.toml", "-v"]);
        assert_eq!(cli.config_name().as_deref(), Some("fleet"));

        let file_config = Config {
            submit_policy: SubmitPolicy::FullRecord,
            submission_file: Some(PathBuf::from("from-file.json")),
            ..Default::default()
        };
        let merged = cli.merge_with_config(file_config);
        assert_eq!(merged.submit_policy, SubmitPolicy::FullRecord);
        assert_eq!(merged.submission_file, Some(PathBuf::from("from-file.json")));
        assert!(merged.verbose);
    }
}
