//! Filtering configuration for entry selection.
//!
//! This module defines the bounds an entry must satisfy to be listed. Every
//! bound is optional; an absent bound places no restriction on its axis.

/// Inclusion bounds applied to every listed entry.
///
/// Built once per invocation from the parsed command line and passed by
/// reference to the scanner. The three bounds are independent and must all
/// hold for an entry to be listed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Smallest size in bytes an entry may have
    pub min_size: Option<u64>,

    /// Largest size in bytes an entry may have
    pub max_size: Option<u64>,

    /// Maximum age in days since the entry was last modified
    pub max_days: Option<u32>,
}
