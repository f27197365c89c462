//! # Version Allocator
//!
//! Computes the version for an incoming upload from the current,
//! newest-first build listing. Not safe on its own under concurrent
//! uploads to one game; [`crate::store::BuildStore::publish`] calls it while
//! holding the game's upload lock.

use s42_core::BuildVersion;

/// Next version to assign, given builds ordered newest-first.
///
/// An empty listing yields [`BuildVersion::FIRST`]. A head entry that does
/// not parse as a version is treated as version 0, so the result is again
/// `FIRST`.
pub fn next_version(existing: &[String]) -> BuildVersion {
    let Some(latest) = existing.first() else {
        return BuildVersion::FIRST;
    };
    match BuildVersion::parse(latest) {
        Ok(version) => version.next(),
        Err(_) => {
            tracing::warn!(latest = %latest, "latest build directory is not a version number, treating as 0");
            BuildVersion::FIRST
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::sort_newest_first;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_upload_is_version_one() {
        assert_eq!(next_version(&[]), BuildVersion::FIRST);
    }

    #[test]
    fn increments_latest() {
        assert_eq!(next_version(&names(&["4", "3", "1"])).get(), 5);
    }

    #[test]
    fn unparsable_latest_counts_as_zero() {
        assert_eq!(next_version(&names(&["latest"])).get(), 1);
    }

    #[test]
    fn gaps_are_not_filled() {
        // A failed upload may have consumed a number; allocation continues from the head.
        assert_eq!(next_version(&names(&["7", "2"])).get(), 8);
    }

    #[test]
    fn double_digit_history_continues_numerically() {
        let mut builds = names(&["1", "2", "9", "10"]);
        sort_newest_first(&mut builds);
        assert_eq!(next_version(&builds).get(), 11);
    }
}
