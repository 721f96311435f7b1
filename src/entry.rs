//! Listed entries and their printable projection.
//!
//! An [`Entry`] is the metadata read for one visited path. A [`Record`] is
//! the formatted form of an entry that passed the filter, ready to be written
//! as one tab-delimited line.

use std::{
    fmt,
    fs::Metadata,
    io,
    path::PathBuf,
    time::SystemTime,
};

use chrono::{DateTime, Local};

use crate::utils::format_size;

/// Timestamp layout used in records.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Metadata of a single filesystem entry.
///
/// Read fresh for every visited path and never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Full path, as built by joining the parent path and the entry name
    pub path: PathBuf,

    /// Size in bytes
    pub size: u64,

    /// Last modification time
    pub modified: SystemTime,

    /// Whether the entry (after following symlinks) is a directory
    pub is_dir: bool,
}

impl Entry {
    /// Build an entry from the metadata of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform does not report a modification time.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> io::Result<Self> {
        Ok(Self {
            path,
            size: metadata.len(),
            modified: metadata.modified()?,
            is_dir: metadata.is_dir(),
        })
    }

    /// Modification time in the local time zone.
    #[must_use]
    pub fn modified_local(&self) -> DateTime<Local> {
        self.modified.into()
    }

    /// Project this entry into a printable record.
    #[must_use]
    pub fn record(&self) -> Record {
        Record {
            time: self.modified_local().format(TIME_FORMAT).to_string(),
            size: format_size(self.size),
            path: self.path.display().to_string(),
            suffix: if self.is_dir { '/' } else { ' ' },
        }
    }
}

/// One formatted line of the listing.
///
/// Renders as `time<TAB>size<TAB>path<suffix>`, without the line break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Modification time as `YYYY-MM-DD HH:MM`
    pub time: String,

    /// Size with a unit letter, e.g. `1.5K`
    pub size: String,

    /// Path as displayed, with invalid UTF-8 replaced
    pub path: String,

    /// `/` for directories, a space otherwise
    pub suffix: char,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}{}", self.time, self.size, self.path, self.suffix)
    }
}
