//! Whole-file compaction: move each file once, in full or not at all.

use super::{CompactionStats, Compactor};
use crate::config::CompactionPolicy;
use crate::disk::{BlockId, Disk};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Visits File blocks from the tail toward the head, moving each into the
/// leftmost Free block before it that can hold it entirely.
///
/// Blocks are tracked by handle, which survives relocation, so a file is
/// attempted at most once per compactor even if Free space opens up to its
/// left later on.
#[derive(Debug)]
pub struct WholeFileCompactor {
    disk: Disk,
    visited: HashSet<BlockId>,
}

impl WholeFileCompactor {
    /// Take ownership of `disk`.
    pub fn new(disk: Disk) -> Self {
        Self {
            disk,
            visited: HashSet::new(),
        }
    }

    /// Give the disk back.
    pub fn into_inner(self) -> Disk {
        self.disk
    }

    /// Nearest File block before `id`.
    fn prev_file(&self, id: BlockId) -> Option<BlockId> {
        let mut cursor = self.disk.prev(id);
        while let Some(candidate) = cursor {
            if !self.disk.get(candidate)?.is_free() {
                return Some(candidate);
            }
            cursor = self.disk.prev(candidate);
        }
        None
    }

    /// Leftmost Free block before `file` that can hold it entirely.
    fn leftmost_fit(&self, file: BlockId) -> Option<BlockId> {
        let needed = self.disk.get(file)?.len();
        let mut cursor = self.disk.scan_free(self.disk.head(), Some(file));
        while let Some(free) = cursor {
            if self.disk.get(free)?.len() >= needed {
                return Some(free);
            }
            cursor = self.disk.scan_free(self.disk.next(free), Some(file));
        }
        None
    }
}

impl Compactor for WholeFileCompactor {
    fn policy(&self) -> CompactionPolicy {
        CompactionPolicy::WholeFile
    }

    fn compact(&mut self) -> CompactionStats {
        let mut stats = CompactionStats::new(self.policy());

        let mut cursor = self.disk.last_file();
        while let Some(file) = cursor {
            // Moving `file` never moves or excises another File block, so the
            // next one to visit can be found up front.
            cursor = self.prev_file(file);

            if !self.visited.insert(file) {
                continue;
            }
            match self.leftmost_fit(file) {
                Some(free) => {
                    let moved = self.disk.move_blocks(file, free);
                    trace!(%file, %free, units = moved, "whole-file move");
                    stats.moves += 1;
                    stats.units_moved += moved;
                }
                None => stats.files_skipped += 1,
            }
        }

        debug!(
            moves = stats.moves,
            skipped = stats.files_skipped,
            "whole-file compaction finished"
        );
        stats
    }

    fn disk(&self) -> &Disk {
        &self.disk
    }

    fn into_disk(self: Box<Self>) -> Disk {
        self.disk
    }
}
