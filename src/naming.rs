//! Output filename allocation.
//!
//! Saved photos are renamed after their date and the folder they live in:
//!
//! ```text
//! <YYYY-MM-DD> (<folder>) <n>.<ext>     dated
//! <folder> <n>.<ext>                    undated
//! ```
//!
//! `<ext>` is the source file's extension, lower-cased. `<n>` is one more
//! than the highest running number already used by files in the folder that
//! fit the same pattern (case-insensitive, any whitespace run between the
//! parts). The file being saved doesn't count against itself, so saving an
//! already-named file again keeps its name.
//!
//! The allocator works on a [`FolderSnapshot`] rather than the live
//! filesystem: the same snapshot and inputs always give the same path.
//! Collisions are checked ignoring case, as macOS and Windows volumes
//! compare names, so a candidate never lands on a different file that only
//! differs in case.

use crate::dates::CanonicalDate;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The file names present in a folder at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSnapshot {
    names: BTreeSet<String>,
}

impl FolderSnapshot {
    /// Snapshot the regular files directly inside `folder`.
    pub fn read(folder: &Path) -> std::io::Result<Self> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a file called `name` exists, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name) || {
            let wanted = name.to_lowercase();
            self.names.iter().any(|n| n.to_lowercase() == wanted)
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// The pieces an output name is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    date: Option<CanonicalDate>,
    folder_name: String,
    /// Lower-cased, with the leading dot; empty when the source has none.
    extension: String,
}

impl NameTemplate {
    pub fn new(date: Option<CanonicalDate>, folder: &Path, source: &Path) -> Self {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            date,
            folder_name,
            extension,
        }
    }

    /// The file name for running number `n`.
    pub fn file_name(&self, n: u64) -> String {
        match self.date {
            Some(date) => format!("{date} ({}) {n}{}", self.folder_name, self.extension),
            None => format!("{} {n}{}", self.folder_name, self.extension),
        }
    }

    /// Literal parts preceding the running number, each followed by at
    /// least one whitespace character.
    fn leading_parts(&self) -> Vec<String> {
        match self.date {
            Some(date) => vec![date.to_string(), format!("({})", self.folder_name)],
            None => vec![self.folder_name.clone()],
        }
    }

    /// The running number of `name` if it fits this template.
    pub fn running_number(&self, name: &str) -> Option<u64> {
        let lowered = name.to_lowercase();
        let mut rest = lowered.as_str();

        for part in self.leading_parts() {
            rest = rest.strip_prefix(part.to_lowercase().as_str())?;
            let trimmed = rest.trim_start();
            if trimmed.len() == rest.len() {
                return None;
            }
            rest = trimmed;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, tail) = rest.split_at(digits_end);
        if digits.is_empty() || tail != self.extension {
            return None;
        }
        digits.parse().ok()
    }
}

/// Next collision-free path for `current` in `folder`.
///
/// Returns `current` itself when it already carries the name it would be
/// given.
pub fn next_path(
    folder: &Path,
    current: &Path,
    date: Option<CanonicalDate>,
    snapshot: &FolderSnapshot,
) -> PathBuf {
    let template = NameTemplate::new(date, folder, current);
    let current_name = current
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let highest = snapshot
        .names()
        .filter(|name| *name != current_name)
        .filter_map(|name| template.running_number(name))
        .max()
        .unwrap_or(0);

    let mut n = highest.saturating_add(1);
    let mut candidate = template.file_name(n);
    // Names that exist without fitting the pattern still block a candidate.
    loop {
        if same_name(&candidate, &current_name) {
            return current.to_path_buf();
        }
        if !snapshot.contains(&candidate) {
            return folder.join(candidate);
        }
        n += 1;
        candidate = template.file_name(n);
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
