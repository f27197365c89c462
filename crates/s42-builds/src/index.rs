//! # Build Directory Index
//!
//! Enumerates a game's build directories and orders them newest-first.
//!
//! Ordering is by parsed version number, so `10` sorts ahead of `9`.
//! Directory names that are not versions count as version 0 and sort last,
//! ties broken by reverse lexicographic order. Position 0 is always the
//! build the version allocator treats as the latest.
//!
//! Hidden (dot-prefixed) directories are staging areas for uploads still
//! being extracted and are never listed.

use std::fs;
use std::path::Path;

use s42_core::BuildVersion;

use crate::error::StorageError;

/// List the build directory names under `game_dir`, newest first.
///
/// Plain files, symlinks, hidden entries and non-UTF-8 names are skipped.
pub fn list_build_dirs(game_dir: &Path) -> Result<Vec<String>, StorageError> {
    let unavailable = |source| StorageError::Unavailable {
        path: game_dir.to_path_buf(),
        source,
    };

    let mut builds = Vec::new();
    for entry in fs::read_dir(game_dir).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        if !entry.file_type().map_err(unavailable)?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        builds.push(name);
    }

    sort_newest_first(&mut builds);
    Ok(builds)
}

/// Sort build names so the highest version comes first.
pub fn sort_newest_first(names: &mut [String]) {
    names.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

/// Numeric value of a build directory name, `0` when it is not a version.
pub fn version_value(name: &str) -> u64 {
    BuildVersion::parse(name).map(BuildVersion::get).unwrap_or(0)
}

fn sort_key(name: &str) -> (u64, &str) {
    (version_value(name), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn numeric_order_not_string_order() {
        let mut builds = names(&["1", "2", "10"]);
        sort_newest_first(&mut builds);
        assert_eq!(builds, names(&["10", "2", "1"]));
    }

    #[test]
    fn non_numeric_names_sort_last() {
        let mut builds = names(&["old", "3", "beta", "12"]);
        sort_newest_first(&mut builds);
        assert_eq!(builds, names(&["12", "3", "old", "beta"]));
    }

    #[test]
    fn equal_values_break_ties_deterministically() {
        let mut builds = names(&["007", "7"]);
        sort_newest_first(&mut builds);
        assert_eq!(builds, names(&["7", "007"]));
    }

    #[test]
    fn missing_directory_is_reported_as_missing() {
        let root = tempfile::tempdir().unwrap();
        let err = list_build_dirs(&root.path().join("nope")).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert!(list_build_dirs(root.path()).unwrap().is_empty());
    }

    #[test]
    fn skips_files_and_staging_directories() {
        let root = tempfile::tempdir().unwrap();
        for dir in ["1", "2", "10", ".staging-abc"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        fs::write(root.path().join("99"), b"stray file").unwrap();
        fs::write(root.path().join("notes.txt"), b"stray file").unwrap();

        let builds = list_build_dirs(root.path()).unwrap();
        assert_eq!(builds, names(&["10", "2", "1"]));
    }

    proptest! {
        #[test]
        fn first_element_has_maximum_value(values in proptest::collection::vec(1u64..100_000, 1..30)) {
            let mut builds: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            sort_newest_first(&mut builds);
            let max = *values.iter().max().unwrap();
            prop_assert_eq!(version_value(&builds[0]), max);
        }
    }
}
