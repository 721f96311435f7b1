//! Directory scanning and entry listing functionality.
//!
//! This module provides the traversal that walks a directory tree, reads the
//! metadata of every visited entry and yields the ones passing the filter.
//! Failures to read a path are yielded as errors and never stop the walk.

use std::{ffi::OsStr, fs, path::Path};

use anyhow::{Result, anyhow};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::{FilterOptions, ScanOptions},
    entry::Entry,
    filtering::matches_filter,
};

/// Directory scanner producing filtered listings.
///
/// The `Scanner` holds the traversal and filter configuration for one
/// invocation. Each call to [`Scanner::scan`] walks one root from scratch.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Bounds an entry must satisfy to be listed
    filter_options: FilterOptions,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use dirlist::{config::{FilterOptions, ScanOptions}, scanner::Scanner};
    /// let scan_options = ScanOptions {
    ///     recursive: true,
    ///     ..ScanOptions::default()
    /// };
    ///
    /// let scanner = Scanner::new(scan_options, FilterOptions::default());
    /// ```
    #[must_use]
    pub const fn new(scan_options: ScanOptions, filter_options: FilterOptions) -> Self {
        Self {
            scan_options,
            filter_options,
        }
    }

    /// Lazily list the entries under `root`.
    ///
    /// A root that is not a directory yields at most itself. A root directory
    /// is not listed; its children are, followed by the contents of each child
    /// directory when scanning recursively (depth-first, in the order the
    /// filesystem enumerates them).
    ///
    /// Symbolic links are followed. Pending directories are kept on an
    /// explicit stack, so tree depth is bounded only by the filesystem.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::{ffi::OsStr, fs, path::Path};
    /// # use dirlist::{config::{FilterOptions, ScanOptions}, scanner::Scanner};
    /// let scanner = Scanner::new(ScanOptions::default(), FilterOptions::default());
    /// for result in scanner.scan(Path::new(".")) {
    ///     match result {
    ///         Ok(entry) => println!("{}", entry.record()),
    ///         Err(e) => eprintln!("{e}"),
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn scan(&self, root: &Path) -> Entries<'_> {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .max_depth(self.scan_options.effective_max_depth())
            .into_iter();

        Entries {
            scanner: self,
            walker,
            pending: None,
        }
    }

    /// Determine if a walked entry should be visited at all.
    ///
    /// Roots are always visited. Below a root, hidden entries are skipped
    /// unless requested, as are entries named in the skip list. A skipped
    /// entry is neither listed nor descended into.
    fn should_visit(&self, entry: &DirEntry) -> bool {
        entry.depth() == 0 || self.accepts_name(entry.file_name())
    }

    /// Check an entry name against the hidden rule and the skip list.
    fn accepts_name(&self, name: &OsStr) -> bool {
        if !self.scan_options.include_hidden && is_hidden(name) {
            return false;
        }

        !self.is_in_skip_list(name)
    }

    /// Check if an entry's name is in the skip list.
    fn is_in_skip_list(&self, name: &OsStr) -> bool {
        self.scan_options.skip.iter().any(|skip| name == skip.as_str())
    }

    /// Whether an entry at `depth` would be descended into.
    const fn descends_from(&self, depth: usize) -> bool {
        depth < self.scan_options.effective_max_depth()
    }

    /// Read the metadata of a walked entry.
    fn read_entry(dir_entry: &DirEntry) -> Result<Entry> {
        let metadata = dir_entry.metadata().map_err(|e| describe_walk_error(&e))?;

        Entry::from_metadata(dir_entry.path().to_path_buf(), &metadata)
            .map_err(|e| anyhow!("{}: {e}", dir_entry.path().display()))
    }
}

/// Lazy sequence of listed entries for one root.
///
/// Yields `Ok` for every entry passing the filter and `Err` for every path
/// that could not be read. Iteration continues after an error.
#[derive(Debug)]
pub struct Entries<'a> {
    scanner: &'a Scanner,
    walker: walkdir::IntoIter,

    /// Diagnostic to yield before resuming the walk
    pending: Option<anyhow::Error>,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(err) = self.pending.take() {
                return Some(Err(err));
            }

            let dir_entry = match self.walker.next()? {
                Ok(dir_entry) => dir_entry,
                Err(e) if e.loop_ancestor().is_some() => match self.list_loop_link(&e) {
                    Some(result) => return Some(result),
                    None => continue,
                },
                Err(e) => return Some(Err(describe_walk_error(&e))),
            };

            if !self.scanner.should_visit(&dir_entry) {
                self.skip_descent(&dir_entry);
                continue;
            }

            let entry = match Scanner::read_entry(&dir_entry) {
                Ok(entry) => entry,
                Err(e) => {
                    self.skip_descent(&dir_entry);
                    return Some(Err(e));
                }
            };

            // The root directory itself is not part of its listing.
            if dir_entry.depth() == 0 && entry.is_dir {
                continue;
            }

            if matches_filter(&entry, &self.scanner.filter_options) {
                return Some(Ok(entry));
            }
        }
    }
}

impl Entries<'_> {
    /// Keep the walker from descending into the entry just yielded.
    fn skip_descent(&mut self, dir_entry: &DirEntry) {
        if dir_entry.file_type().is_dir() {
            self.walker.skip_current_dir();
        }
    }

    /// List a symlink that resolves to one of its own ancestors.
    ///
    /// The walker reports such a link as an error and never descends into it,
    /// yet the link itself is readable and gets listed like any other entry.
    /// The loop is only worth a diagnostic when the walk would have descended.
    fn list_loop_link(&mut self, err: &walkdir::Error) -> Option<Result<Entry>> {
        let (Some(path), Some(ancestor)) = (err.path(), err.loop_ancestor()) else {
            return Some(Err(describe_walk_error(err)));
        };

        let name = path.file_name().unwrap_or_else(|| path.as_os_str());
        if err.depth() > 0 && !self.scanner.accepts_name(name) {
            return None;
        }

        let entry = match fs::metadata(path)
            .and_then(|metadata| Entry::from_metadata(path.to_path_buf(), &metadata))
        {
            Ok(entry) => entry,
            Err(e) => return Some(Err(anyhow!("{}: {e}", path.display()))),
        };

        if self.scanner.descends_from(err.depth()) {
            self.pending = Some(anyhow!(
                "{}: file system loop back to {}",
                path.display(),
                ancestor.display()
            ));
        }

        matches_filter(&entry, &self.scanner.filter_options).then_some(Ok(entry))
    }
}

/// Check if an entry name starts with a dot.
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(b".")
}

/// Turn a walk error into a `<path>: <cause>` diagnostic.
fn describe_walk_error(err: &walkdir::Error) -> anyhow::Error {
    match (err.path(), err.io_error()) {
        (Some(path), Some(io_err)) => anyhow!("{}: {io_err}", path.display()),
        _ => anyhow!("{err}"),
    }
}
