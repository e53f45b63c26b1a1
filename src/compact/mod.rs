//! Compaction policies.
//!
//! Each compactor takes exclusive ownership of the [`Disk`] it drives and
//! relocates File units only through [`Disk::move_blocks`], so the disk's
//! capacity is the same before and after compaction.

mod fragmenting;
mod whole_file;

pub use fragmenting::FragmentingCompactor;
pub use whole_file::WholeFileCompactor;

use crate::config::CompactionPolicy;
use crate::disk::Disk;
use serde::{Deserialize, Serialize};

/// Counters collected by one compaction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionStats {
    /// Policy that produced these counters.
    pub policy: CompactionPolicy,
    /// Number of `move_blocks` calls.
    pub moves: usize,
    /// Number of units relocated.
    pub units_moved: u64,
    /// Files that were considered but left in place.
    pub files_skipped: usize,
}

impl CompactionStats {
    fn new(policy: CompactionPolicy) -> Self {
        Self {
            policy,
            moves: 0,
            units_moved: 0,
            files_skipped: 0,
        }
    }
}

/// A compaction policy driving one disk.
pub trait Compactor {
    /// The policy this compactor implements.
    fn policy(&self) -> CompactionPolicy;

    /// Compact the disk in place.
    ///
    /// Calling this again on an already compacted disk performs no moves.
    fn compact(&mut self) -> CompactionStats;

    /// The disk being compacted.
    fn disk(&self) -> &Disk;

    /// Give the disk back.
    fn into_disk(self: Box<Self>) -> Disk;
}

/// Create the compactor for `policy`, taking ownership of `disk`.
pub fn compactor_for(policy: CompactionPolicy, disk: Disk) -> Box<dyn Compactor> {
    match policy {
        CompactionPolicy::Fragmenting => Box::new(FragmentingCompactor::new(disk)),
        CompactionPolicy::WholeFile => Box::new(WholeFileCompactor::new(disk)),
    }
}
