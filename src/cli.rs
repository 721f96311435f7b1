//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library. `-h` selects the maximum size, so
//! clap's automatic `-h` help flag is disabled and help is `--help` only.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use dirlist::config::file::{FileConfig, expand_tilde};
use dirlist::config::{FilterOptions, OutputOptions, ScanOptions};
use dirlist::utils::parse_size;

/// Command-line arguments bounding which entries are listed.
#[derive(Parser)]
struct FilteringArgs {
    /// Only list entries of at least this size
    ///
    /// An integer with an optional unit: B (bytes, the default), K, M or G
    /// (powers of 1024). Examples: 512, 10K, 1.5M, 2G.
    #[arg(short = 'l', long, value_name = "SIZE")]
    min_size: Option<String>,

    /// Only list entries of at most this size
    ///
    /// Same format as --min-size.
    #[arg(short = 'h', long, value_name = "SIZE")]
    max_size: Option<String>,

    /// Only list entries modified within the last DAYS days
    ///
    /// Age is measured as elapsed time from now, so 1 means the last 24 hours.
    #[arg(short = 'm', long, value_name = "DAYS")]
    max_days: Option<u32>,
}

/// Command-line arguments controlling which directories are walked.
#[derive(Parser)]
struct ScanningArgs {
    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Include entries whose name starts with '.'
    #[arg(short = 'a', long)]
    all: bool,

    /// Maximum directory depth when recursing (1 = immediate children only)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Entry names to neither list nor descend into
    ///
    /// Can be specified multiple times.
    #[arg(long, value_name = "NAME", action = ArgAction::Append)]
    skip: Vec<String>,
}

/// Command-line arguments controlling output.
#[derive(Parser)]
struct OutputArgs {
    /// Print one JSON object per entry instead of tab-delimited records
    #[arg(long)]
    json: bool,

    /// Do not report paths that could not be read
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "dirlist")]
#[command(about = "List files with their modification time and size, filtered by size and age")]
#[command(version)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Files or directories to list (defaults to the current directory)
    #[arg(num_args = 0.., value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Ignore the configuration file
    #[arg(long)]
    no_config: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// Filtering options
    #[command(flatten)]
    filtering: FilteringArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,
}

impl Cli {
    /// Whether the configuration file should be read.
    #[must_use]
    pub const fn use_config_file(&self) -> bool {
        !self.no_config
    }

    /// Resolve the paths to list from CLI args, config file, or default.
    ///
    /// Priority: CLI arguments > config file `dirs` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn paths(&self, config: &FileConfig) -> Vec<PathBuf> {
        if !self.paths.is_empty() {
            return self.paths.clone();
        }

        if let Some(ref dirs) = config.dirs
            && !dirs.is_empty()
        {
            return dirs.iter().map(|d| expand_tilde(d)).collect();
        }

        vec![PathBuf::from(".")]
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **recursive**, **all**: CLI flag `||` config value `||` `false`
    /// - **`max_depth`**: CLI > config > unlimited
    /// - **skip**: merged from both sources (config values first, then CLI)
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut skip = config.scanning.skip.clone().unwrap_or_default();
        skip.extend(self.scanning.skip.iter().cloned());

        ScanOptions {
            recursive: self.scanning.recursive || config.scanning.recursive.unwrap_or(false),
            include_hidden: self.scanning.all || config.scanning.all.unwrap_or(false),
            max_depth: self.scanning.max_depth.or(config.scanning.max_depth),
            skip,
        }
    }

    /// Extract filtering options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > unbounded. Size strings are
    /// parsed here, before any traversal starts.
    ///
    /// # Errors
    ///
    /// Returns an error if a minimum or maximum size cannot be parsed.
    pub fn filter_options(&self, config: &FileConfig) -> Result<FilterOptions> {
        let min_size = self
            .filtering
            .min_size
            .as_deref()
            .or(config.filtering.min_size.as_deref());
        let max_size = self
            .filtering
            .max_size
            .as_deref()
            .or(config.filtering.max_size.as_deref());

        Ok(FilterOptions {
            min_size: parse_bound("minimum size", min_size)?,
            max_size: parse_bound("maximum size", max_size)?,
            max_days: self.filtering.max_days.or(config.filtering.max_days),
        })
    }

    /// Extract output options from CLI args and config file.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            json: self.output.json || config.output.json.unwrap_or(false),
            quiet: self.output.quiet || config.output.quiet.unwrap_or(false),
        }
    }
}

/// Parse an optional size bound.
fn parse_bound(label: &str, value: Option<&str>) -> Result<Option<u64>> {
    value
        .map(|s| parse_size(s).with_context(|| format!("Invalid {label} {s:?}")))
        .transpose()
}
