//! Configuration types for the listing.
//!
//! Options are split by concern: what passes the filter, how the tree is
//! walked, and how records are emitted. [`FileConfig`] holds the optional
//! defaults read from the persistent configuration file.

pub mod file;
pub mod filter;
pub mod output;
pub mod scan;

pub use file::FileConfig;
pub use filter::FilterOptions;
pub use output::OutputOptions;
pub use scan::ScanOptions;
