//! Utility functions and helpers.
//!
//! This module contains the size codec used to read `--min-size`/`--max-size`
//! values and to render entry sizes in the listing.

pub mod size;

pub use size::{format_size, parse_size};
