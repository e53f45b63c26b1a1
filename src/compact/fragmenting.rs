//! Fragmenting compaction: fill the earliest Free space from the tail.

use super::{CompactionStats, Compactor};
use crate::config::CompactionPolicy;
use crate::disk::Disk;
use tracing::{debug, trace};

/// Moves trailing File units into the earliest Free block until no Free
/// space lies before the last File unit. Files may end up split.
#[derive(Debug)]
pub struct FragmentingCompactor {
    disk: Disk,
}

impl FragmentingCompactor {
    /// Take ownership of `disk`.
    pub fn new(disk: Disk) -> Self {
        Self { disk }
    }

    /// Give the disk back.
    pub fn into_inner(self) -> Disk {
        self.disk
    }
}

impl Compactor for FragmentingCompactor {
    fn policy(&self) -> CompactionPolicy {
        CompactionPolicy::Fragmenting
    }

    fn compact(&mut self) -> CompactionStats {
        let mut stats = CompactionStats::new(self.policy());

        // A Free tail sits past the last File block and is left alone; every
        // other Free block precedes the last File block.
        while let (Some(source), Some(free)) = (self.disk.last_file(), self.disk.first_free()) {
            if Some(free) == self.disk.tail() {
                break;
            }

            let moved = self.disk.move_blocks(source, free);
            trace!(%source, %free, units = moved, "fragmenting move");
            stats.moves += 1;
            stats.units_moved += moved;
        }

        debug!(
            moves = stats.moves,
            units = stats.units_moved,
            "fragmenting compaction finished"
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
