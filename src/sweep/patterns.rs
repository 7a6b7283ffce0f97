//! Forbidden-name registry: case-insensitive substring matching on file names.

use std::ffi::OsStr;

use memchr::memmem::{self, Finder};

/// Needles shipped by default. Files whose name contains any of these
/// (case-insensitively) are swept out of the dist tree.
pub const DEFAULT_FORBIDDEN: [&str; 2] = ["ap2", "a2a"];

#[derive(Debug, Clone)]
struct Needle {
    text: String,
    finder: Finder<'static>,
}

/// Compiled set of forbidden name fragments.
///
/// Needles are normalized to lowercase once at construction; each lookup
/// lowercases the candidate file name and runs a precompiled substring
/// search per needle.
#[derive(Debug, Clone)]
pub struct ForbiddenSet {
    needles: Vec<Needle>,
}

impl Default for ForbiddenSet {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN)
    }
}

impl ForbiddenSet {
    /// Build a set from raw needles. Needles are trimmed and lowercased;
    /// blank needles are dropped (an empty needle is a substring of every name).
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = needles
            .into_iter()
            .filter_map(|raw| {
                let text = raw.as_ref().trim().to_lowercase();
                if text.is_empty() {
                    return None;
                }
                let finder = memmem::Finder::new(&text).into_owned();
                Some(Needle { text, finder })
            })
            .collect();
        Self { needles }
    }

    /// First needle contained in `file_name`, matched case-insensitively.
    ///
    /// Matching sees only the file name, never the parent path.
    #[must_use]
    pub fn matched_needle(&self, file_name: &OsStr) -> Option<&str> {
        let normalized = file_name.to_string_lossy().to_lowercase();
        self.needles
            .iter()
            .find(|needle| needle.finder.find(normalized.as_bytes()).is_some())
            .map(|needle| needle.text.as_str())
    }

    /// Whether `file_name` contains any forbidden fragment.
    #[must_use]
    pub fn is_forbidden(&self, file_name: &OsStr) -> bool {
        self.matched_needle(file_name).is_some()
    }

    /// Needles in match order, for diagnostics.
    pub fn needles(&self) -> impl Iterator<Item = &str> {
        self.needles.iter().map(|needle| needle.text.as_str())
    }

    /// Number of needles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.needles.len()
    }

    /// True when no needles survived construction; such a set matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}
