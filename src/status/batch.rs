use crate::size::display_size;
use crate::status::layout::PipelineRoots;
use crate::status::scan::{sorted_subdirectories, ItemFilter, Tally};
use rayon::prelude::*;
use std::fmt;

/// Inbox, processed and failed tallies of one vault batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub name: String,
    pub inbox: Tally,
    pub processed: Tally,
    pub failed: Tally,
}

impl BatchRow {
    pub fn measure(roots: &PipelineRoots, name: &str) -> Self {
        let outbox = roots.batch_outbox(name);
        Self {
            name: name.to_string(),
            inbox: Tally::measure(&roots.batch_inbox().join(name), ItemFilter::Directories),
            processed: Tally::measure(&outbox.join("processed"), ItemFilter::Directories),
            failed: Tally::measure(&outbox.join("failed"), ItemFilter::Directories),
        }
    }

    /// A drained batch without failures is hidden unless all batches are
    /// requested.
    pub fn is_visible(&self, all_batches: bool) -> bool {
        all_batches || self.inbox.items > 0 || self.failed.items > 0
    }
}

/// Measures every batch under the vault batch inbox, in name order.
pub fn collect_batches(roots: &PipelineRoots) -> Vec<BatchRow> {
    sorted_subdirectories(&roots.batch_inbox())
        .par_iter()
        .map(|name| BatchRow::measure(roots, name))
        .collect()
}

pub struct BatchHeader;

impl fmt::Display for BatchHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:>6} {:<12} {:>10} {:<12} {:>7} {:<11}",
            "BATCH", "INBOX", "(SIZE)", "PROCESSED", "(SIZE)", "FAILED", "(SIZE)"
        )
    }
}

impl fmt::Display for BatchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:>6} {:<12} {:>10} {:<12} {:>7} {}",
            self.name,
            self.inbox.items,
            parenthesized_size(&self.inbox),
            self.processed.items,
            parenthesized_size(&self.processed),
            self.failed.items,
            parenthesized_size(&self.failed),
        )
    }
}

fn parenthesized_size(tally: &Tally) -> String {
    format!("({})", display_size(tally.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn roots(base: &Path) -> PipelineRoots {
        PipelineRoots {
            collect_inbox: base.join("collect/p"),
            working_space: base.join("work/p"),
            vault_batch_root: base.join("batches/p"),
            vault_root: base.join("vault/p"),
        }
    }

    fn tally(items: u64) -> Tally {
        Tally { items, bytes: 0 }
    }

    fn row(inbox: u64, processed: u64, failed: u64) -> BatchRow {
        BatchRow {
            name: "b".to_string(),
            inbox: tally(inbox),
            processed: tally(processed),
            failed: tally(failed),
        }
    }

    #[test]
    fn drained_batch_only_visible_with_all_batches() {
        let drained = row(0, 5, 0);
        assert!(!drained.is_visible(false));
        assert!(drained.is_visible(true));
    }

    #[test]
    fn failed_or_pending_batch_always_visible() {
        assert!(row(0, 5, 1).is_visible(false));
        assert!(row(2, 0, 0).is_visible(false));
        assert!(row(0, 0, 0).is_visible(true));
        assert!(!row(0, 0, 0).is_visible(false));
    }

    #[test]
    fn correlates_inbox_with_outbox() {
        let tmp = TempDir::new().unwrap();
        let roots = roots(tmp.path());
        fs::create_dir_all(roots.batch_inbox().join("b1/item1")).unwrap();
        fs::create_dir_all(roots.batch_inbox().join("b1/item2")).unwrap();
        fs::write(roots.batch_inbox().join("b1/item2/data.bin"), [0u8; 1500]).unwrap();
        fs::write(roots.batch_inbox().join("b1/manifest.txt"), b"m").unwrap();
        let outbox = roots.batch_outbox("b1");
        for item in ["x", "y", "z"] {
            fs::create_dir_all(outbox.join("processed").join(item)).unwrap();
        }
        fs::create_dir_all(outbox.join("failed/bad")).unwrap();

        let row = BatchRow::measure(&roots, "b1");
        assert_eq!(row.inbox, Tally { items: 2, bytes: 1501 });
        assert_eq!(row.processed.items, 3);
        assert_eq!(row.failed.items, 1);
    }

    #[test]
    fn missing_outbox_yields_zero() {
        let tmp = TempDir::new().unwrap();
        let roots = roots(tmp.path());
        fs::create_dir_all(roots.batch_inbox().join("b1/item1")).unwrap();

        let row = BatchRow::measure(&roots, "b1");
        assert_eq!(row.inbox.items, 1);
        assert_eq!(row.processed, Tally::default());
        assert_eq!(row.failed, Tally::default());
    }

    #[test]
    fn batches_are_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        let roots = roots(tmp.path());
        for name in ["2024-03", "2024-01", "2024-10", "2024-02"] {
            fs::create_dir_all(roots.batch_inbox().join(name)).unwrap();
        }
        fs::write(roots.batch_inbox().join("README"), b"not a batch").unwrap();

        let names: Vec<_> = collect_batches(&roots).into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["2024-01", "2024-02", "2024-03", "2024-10"]);
    }

    #[test]
    fn missing_batch_inbox_has_no_rows() {
        let tmp = TempDir::new().unwrap();
        assert!(collect_batches(&roots(tmp.path())).is_empty());
    }

    #[test]
    fn row_layout() {
        let row = BatchRow {
            name: "batch1".to_string(),
            inbox: Tally { items: 1, bytes: 0 },
            processed: Tally {
                items: 12,
                bytes: 2_500_000,
            },
            failed: Tally::default(),
        };
        assert_eq!(
            row.to_string(),
            "batch1                    1 (0 bytes)            12 (2.5 MB)           0 (0 bytes)"
        );
    }

    #[test]
    fn header_layout() {
        assert_eq!(
            BatchHeader.to_string(),
            "BATCH                 INBOX (SIZE)        PROCESSED (SIZE)        FAILED (SIZE)     "
        );
    }
}
