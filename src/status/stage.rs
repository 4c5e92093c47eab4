use crate::size::display_size;
use crate::status::layout::PipelineRoots;
use crate::status::scan::{ItemFilter, Tally};
use std::fmt;
use std::path::PathBuf;

const LABEL_WIDTH: usize = 30;

/// A labeled directory whose items are counted and whose contents are sized.
#[derive(Debug, Clone)]
pub struct StageCounter {
    pub label: &'static str,
    pub dir: PathBuf,
    pub filter: ItemFilter,
}

impl StageCounter {
    fn new(label: &'static str, dir: PathBuf, filter: ItemFilter) -> Self {
        Self { label, dir, filter }
    }

    pub fn measure(&self) -> StageLine {
        StageLine {
            label: self.label,
            tally: Tally::measure(&self.dir, self.filter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLine {
    pub label: &'static str,
    pub tally: Tally,
}

impl fmt::Display for StageLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<width$}: {} items ({})",
            self.label,
            self.tally.items,
            display_size(self.tally.bytes),
            width = LABEL_WIDTH
        )
    }
}

pub fn transfer_stages(roots: &PipelineRoots) -> Vec<StageCounter> {
    let extract = roots.extract_metadata();
    let send = roots.send_to_vault();
    vec![
        StageCounter::new("transfer inbox", roots.collect_inbox.clone(), ItemFilter::ZIP),
        StageCounter::new("extract metadata inbox", extract.join("inbox"), ItemFilter::All),
        StageCounter::new(
            "extract metadata failed",
            extract.join("outbox/failed"),
            ItemFilter::ZIP,
        ),
        StageCounter::new(
            "extract metadata rejected",
            extract.join("outbox/rejected"),
            ItemFilter::ZIP,
        ),
        StageCounter::new("send to vault inbox", send.join("inbox"), ItemFilter::ZIP),
        StageCounter::new(
            "send to vault processed",
            send.join("outbox/processed"),
            ItemFilter::ZIP,
        ),
        StageCounter::new("send to vault failed", send.join("outbox/failed"), ItemFilter::ZIP),
        StageCounter::new("send to vault work", send.join("work"), ItemFilter::All),
    ]
}

pub fn vault_stages(roots: &PipelineRoots) -> Vec<StageCounter> {
    vec![
        StageCounter::new("staged layers", roots.vault_root.join("staging"), ItemFilter::All),
        StageCounter::new("archived layers", roots.vault_root.join("archive"), ItemFilter::All),
        StageCounter::new("data vault inbox batches", roots.batch_inbox(), ItemFilter::All),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_pads_label_to_fixed_width() {
        let line = StageLine {
            label: "extract metadata inbox",
            tally: Tally { items: 1, bytes: 0 },
        };
        assert_eq!(
            line.to_string(),
            "extract metadata inbox        : 1 items (0 bytes)"
        );
    }

    #[test]
    fn line_renders_human_size() {
        let line = StageLine {
            label: "staged layers",
            tally: Tally {
                items: 12,
                bytes: 4_500_000,
            },
        };
        assert_eq!(line.to_string(), format!("{:<30}: 12 items (4.5 MB)", "staged layers"));
    }

    #[test]
    fn stage_order_and_filters() {
        let roots = PipelineRoots {
            collect_inbox: PathBuf::from("/c/p"),
            working_space: PathBuf::from("/w/p"),
            vault_batch_root: PathBuf::from("/b/p"),
            vault_root: PathBuf::from("/v/p"),
        };

        let transfer = transfer_stages(&roots);
        let labels: Vec<_> = transfer.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            [
                "transfer inbox",
                "extract metadata inbox",
                "extract metadata failed",
                "extract metadata rejected",
                "send to vault inbox",
                "send to vault processed",
                "send to vault failed",
                "send to vault work",
            ]
        );
        assert_eq!(transfer[0].filter, ItemFilter::ZIP);
        assert_eq!(transfer[1].filter, ItemFilter::All);
        assert_eq!(transfer[7].filter, ItemFilter::All);
        assert_eq!(
            transfer[3].dir,
            PathBuf::from("/w/p/extract-metadata/outbox/rejected")
        );

        let vault = vault_stages(&roots);
        assert_eq!(vault[0].dir, PathBuf::from("/v/p/staging"));
        assert_eq!(vault[1].dir, PathBuf::from("/v/p/archive"));
        assert_eq!(vault[2].dir, PathBuf::from("/b/p/inbox"));
    }
}
