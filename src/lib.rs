//! # dirlist
//!
//! A scriptable directory lister. For every entry under the given paths it
//! prints the modification time, the size and the path on one tab-delimited
//! line, optionally recursing into subdirectories and keeping only entries
//! within size and age bounds.
//!
//! The library exposes the pieces the binary is built from:
//!
//! - [`utils::size`] converts between magnitude strings (`"10M"`) and bytes
//! - [`scanner::Scanner`] walks a tree and lazily yields filtered [`entry::Entry`] values
//! - [`output::RecordWriter`] writes entries as records or JSON lines

pub mod config;
pub mod entry;
pub mod filtering;
pub mod output;
pub mod scanner;
pub mod utils;

pub use config::{FilterOptions, OutputOptions, ScanOptions};
