//! Output configuration.

/// Configuration for how records and diagnostics are emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputOptions {
    /// Emit one JSON object per line instead of tab-delimited records
    pub json: bool,

    /// Suppress per-path error diagnostics on stderr
    pub quiet: bool,
}
