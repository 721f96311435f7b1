//! # dirlist
//!
//! A scriptable alternative to `ls -l` that prints one tab-delimited line per
//! entry: modification time, size and path (directories end in `/`).
//!
//! ## Usage
//!
//! ```bash
//! # List the current directory
//! dirlist
//!
//! # Everything under ~/Downloads, recursively, larger than 10 MiB
//! dirlist -r -l 10M ~/Downloads
//!
//! # Files up to 1 KiB modified within the last two days, hidden ones included
//! dirlist -a -h 1K -m 2 /etc
//! ```

mod cli;

use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use dirlist::{OutputOptions, config::FileConfig, output::RecordWriter, scanner::Scanner};

/// Entry point for the dirlist application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, resolves the layered configuration, then lists every
/// root in turn. Paths that cannot be read are reported on stderr and do not
/// affect the exit status.
///
/// # Errors
///
/// Returns errors from size parsing or from writing to stdout.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    let file_config = if args.use_config_file() {
        load_config()
    } else {
        FileConfig::default()
    };

    let paths = args.paths(&file_config);
    let scan_options = args.scan_options(&file_config);
    let filter_options = args.filter_options(&file_config)?;
    let output_options = args.output_options(&file_config);

    let scanner = Scanner::new(scan_options, filter_options);
    let mut writer = RecordWriter::new(BufWriter::new(io::stdout().lock()), output_options.json);

    for path in &paths {
        match list_root(&scanner, path, &mut writer, output_options) {
            Ok(()) => {}
            // The reader went away (e.g. `dirlist | head`); nothing left to do.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// List one root, writing records to `writer` and diagnostics to stderr.
fn list_root<W: Write>(
    scanner: &Scanner,
    root: &Path,
    writer: &mut RecordWriter<W>,
    output_options: OutputOptions,
) -> io::Result<()> {
    for result in scanner.scan(root) {
        match result {
            Ok(entry) => writer.write_entry(&entry)?,
            Err(e) if !output_options.quiet => {
                writer.flush()?;
                eprintln!("{}", e.to_string().red());
            }
            Err(_) => {}
        }
    }

    writer.flush()
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e:#}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
