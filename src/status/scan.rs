use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Which direct children of a directory count as items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    /// Children whose file name ends with the suffix, e.g. `.zip`.
    Suffix(&'static str),
    Directories,
}

impl ItemFilter {
    pub const ZIP: ItemFilter = ItemFilter::Suffix(".zip");

    fn matches(&self, entry: &DirEntry) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Suffix(suffix) => entry.file_name().to_string_lossy().ends_with(*suffix),
            ItemFilter::Directories => entry.path().is_dir(),
        }
    }
}

/// Item count and recursive byte size of one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub items: u64,
    pub bytes: u64,
}

impl Tally {
    /// Never fails: a field that cannot be read (missing directory, permission
    /// denied, entries vanishing mid-walk) is reported as zero on its own.
    pub fn measure(dir: &Path, filter: ItemFilter) -> Tally {
        Tally {
            items: or_zero(dir, "items", count_items(dir, filter)),
            bytes: or_zero(dir, "bytes", dir_size(dir)),
        }
    }
}

fn or_zero(dir: &Path, field: &'static str, result: io::Result<u64>) -> u64 {
    result.unwrap_or_else(|err| {
        debug!(dir=?dir, field, error=%err, "unreadable, reporting zero");
        0
    })
}

fn count_items(dir: &Path, filter: ItemFilter) -> io::Result<u64> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        if filter.matches(&entry?) {
            count += 1;
        }
    }
    Ok(count)
}

/// Sum of regular file sizes below `dir`. Symlinks are neither followed nor
/// counted.
fn dir_size(dir: &Path) -> io::Result<u64> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(io::Error::other(format!("not a directory: {:?}", dir)));
    }
    let mut total = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(walk_error)?.len();
        }
    }
    Ok(total)
}

fn walk_error(err: walkdir::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}

/// Names of the direct subdirectories of `dir`, sorted byte-wise ascending.
/// A missing or unreadable `dir` yields no names.
pub fn sorted_subdirectories(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir=?dir, error=%err, "cannot list directory");
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
