//! Entry filtering functionality.
//!
//! This module provides the predicate deciding whether an entry is listed,
//! based on its size and on how long ago it was modified.

use chrono::{DateTime, Local};

use crate::config::FilterOptions;
use crate::entry::Entry;

/// Check whether an entry satisfies every configured bound.
///
/// The bounds are independent: an entry failing any one of them is rejected
/// regardless of the others. The current time is sampled on every call.
///
/// # Examples
///
/// ```no_run
/// # use dirlist::{config::FilterOptions, entry::Entry, filtering::matches_filter};
/// # fn example(entry: &Entry) {
/// let filter_opts = FilterOptions {
///     min_size: Some(1024),
///     max_size: None,
///     max_days: Some(7),
/// };
/// if matches_filter(entry, &filter_opts) {
///     println!("{}", entry.record());
/// }
/// # }
/// ```
#[must_use]
pub fn matches_filter(entry: &Entry, filter_opts: &FilterOptions) -> bool {
    meets_size_criteria(entry.size, filter_opts)
        && meets_time_criteria(entry, filter_opts.max_days, Local::now())
}

/// Check the minimum and maximum size bounds.
const fn meets_size_criteria(size: u64, filter_opts: &FilterOptions) -> bool {
    let above_min = match filter_opts.min_size {
        Some(min_size) => size >= min_size,
        None => true,
    };
    let below_max = match filter_opts.max_size {
        Some(max_size) => size <= max_size,
        None => true,
    };

    above_min && below_max
}

/// Check that the entry was modified at most `max_days` days before `now`.
///
/// Age is the elapsed time, not a count of calendar days. Entries with a
/// modification time in the future have a negative age and always pass.
fn meets_time_criteria(entry: &Entry, max_days: Option<u32>, now: DateTime<Local>) -> bool {
    let Some(max_days) = max_days else {
        return true;
    };

    let age = now.signed_duration_since(entry.modified_local());
    age <= chrono::Duration::days(i64::from(max_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    /// Helper function to create a test entry
    fn create_test_entry(size: u64, age: Duration) -> Entry {
        Entry {
            path: PathBuf::from("/test/file"),
            size,
            modified: SystemTime::now() - age,
            is_dir: false,
        }
    }

    const DAY: Duration = Duration::from_secs(86_400);

    #[test]
    fn test_unbounded_filter_accepts_everything() {
        let filter_opts = FilterOptions::default();

        assert!(matches_filter(&create_test_entry(0, DAY * 10_000), &filter_opts));
        assert!(matches_filter(&create_test_entry(u64::MAX, Duration::ZERO), &filter_opts));
    }

    #[test]
    fn test_meets_size_criteria_bounds_are_inclusive() {
        let filter_opts = FilterOptions {
            min_size: Some(1_000),
            max_size: Some(2_000),
            max_days: None,
        };

        assert!(!meets_size_criteria(999, &filter_opts));
        assert!(meets_size_criteria(1_000, &filter_opts));
        assert!(meets_size_criteria(1_500, &filter_opts));
        assert!(meets_size_criteria(2_000, &filter_opts));
        assert!(!meets_size_criteria(2_001, &filter_opts));
    }

    #[test]
    fn test_min_size_excludes_regardless_of_other_bounds() {
        let filter_opts = FilterOptions {
            min_size: Some(1_000),
            max_size: Some(u64::MAX),
            max_days: Some(u32::MAX),
        };

        assert!(!matches_filter(&create_test_entry(500, Duration::ZERO), &filter_opts));
    }

    #[test]
    fn test_all_bounds_must_hold() {
        let filter_opts = FilterOptions {
            min_size: Some(100),
            max_size: Some(1_000),
            max_days: Some(2),
        };

        assert!(matches_filter(&create_test_entry(500, DAY), &filter_opts));
        assert!(!matches_filter(&create_test_entry(500, DAY * 3), &filter_opts));
        assert!(!matches_filter(&create_test_entry(50, DAY), &filter_opts));
        assert!(!matches_filter(&create_test_entry(5_000, DAY), &filter_opts));
    }

    #[test]
    fn test_meets_time_criteria_disabled() {
        let entry = create_test_entry(1, DAY * 1_000);
        assert!(meets_time_criteria(&entry, None, Local::now()));
    }

    #[test]
    fn test_meets_time_criteria_uses_elapsed_time() {
        let now = Local::now();
        let at = |age: Duration| Entry {
            path: PathBuf::from("/test/file"),
            size: 0,
            modified: SystemTime::from(now) - age,
            is_dir: false,
        };

        assert!(meets_time_criteria(&at(DAY), Some(1), now));
        assert!(!meets_time_criteria(&at(DAY + Duration::from_secs(1)), Some(1), now));
        assert!(meets_time_criteria(&at(Duration::ZERO), Some(0), now));
        assert!(!meets_time_criteria(&at(Duration::from_secs(60)), Some(0), now));
    }

    #[test]
    fn test_future_modification_time_passes() {
        let now = Local::now();
        let entry = Entry {
            path: PathBuf::from("/test/file"),
            size: 0,
            modified: SystemTime::from(now) + DAY,
            is_dir: false,
        };

        assert!(meets_time_criteria(&entry, Some(0), now));
    }
}
