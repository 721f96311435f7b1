//! Record emission.
//!
//! Entries are written one per line, either as the tab-delimited record or,
//! when `--json` is given, as a JSON object per line for scripting.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::entry::{Entry, TIME_FORMAT};
use crate::utils::format_size;

/// A single entry in JSON-lines output.
#[derive(Serialize, Debug)]
pub struct JsonRecord {
    /// Modification time as `YYYY-MM-DD HH:MM` in the local time zone.
    pub modified: String,

    /// Modification time in seconds since the Unix epoch.
    pub modified_unix: i64,

    /// Size in bytes.
    pub size: u64,

    /// Size as shown in the tab-delimited listing (e.g. `"1.5K"`).
    pub size_formatted: String,

    /// Path of the entry, with invalid UTF-8 replaced.
    pub path: String,

    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl JsonRecord {
    /// Convert an `Entry` into a `JsonRecord`.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        let modified = entry.modified_local();

        Self {
            modified: modified.format(TIME_FORMAT).to_string(),
            modified_unix: modified.timestamp(),
            size: entry.size,
            size_formatted: format_size(entry.size),
            path: entry.path.display().to_string(),
            is_dir: entry.is_dir,
        }
    }
}

/// Line-oriented writer for listed entries.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer emitting tab-delimited records, or JSON lines if `json` is set.
    pub const fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Write one entry followed by a line break.
    ///
    /// Tab-delimited records carry the path exactly as the filesystem stores
    /// it, so names that are not valid UTF-8 survive a round trip through
    /// other tools.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, &JsonRecord::from_entry(entry))?;
            writeln!(self.out)
        } else {
            let record = entry.record();
            write!(self.out, "{}\t{}\t", record.time, record.size)?;
            write_path(&mut self.out, &entry.path)?;
            writeln!(self.out, "{}", record.suffix)
        }
    }

    /// Flush buffered records.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(unix)]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn sample_entry(is_dir: bool) -> Entry {
        Entry {
            path: PathBuf::from("/data/report.csv"),
            size: 1536,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            is_dir,
        }
    }

    #[test]
    fn test_write_tab_delimited_record() {
        let entry = sample_entry(false);
        let mut writer = RecordWriter::new(Vec::new(), false);
        writer.write_entry(&entry).unwrap();

        let line = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(line, format!("{}\n", entry.record()));

        let fields: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], "1.5K");
        assert_eq!(fields[2], "/data/report.csv ");
    }

    #[test]
    fn test_write_json_record() {
        let entry = sample_entry(true);
        let mut writer = RecordWriter::new(Vec::new(), true);
        writer.write_entry(&entry).unwrap();
        writer.write_entry(&entry).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["size"], 1536);
        assert_eq!(value["size_formatted"], "1.5K");
        assert_eq!(value["path"], "/data/report.csv");
        assert_eq!(value["is_dir"], true);
        assert_eq!(value["modified_unix"], 1_700_000_000);
        assert_eq!(value["modified"], entry.record().time);
    }

    #[test]
    #[cfg(unix)]
    fn test_tab_record_keeps_non_utf8_path_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entry = Entry {
            path: PathBuf::from(OsStr::from_bytes(b"/data/caf\xe9")),
            ..sample_entry(false)
        };

        let mut writer = RecordWriter::new(Vec::new(), false);
        writer.write_entry(&entry).unwrap();
        let line = writer.into_inner();
        assert!(line.ends_with(b"\t/data/caf\xe9 \n"));

        let mut writer = RecordWriter::new(Vec::new(), true);
        writer.write_entry(&entry).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();
        assert_eq!(value["path"], "/data/caf\u{fffd}");
    }
}
