//! Block types: runs of contiguous disk units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a file, assigned sequentially at decode time.
pub type FileId = u64;

/// Stable handle to a block inside a [`Disk`](super::Disk) arena.
///
/// A handle keeps naming the same block when the block moves, and is never
/// reused for another block of the same disk once that block is excised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(usize);

impl BlockId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a block's units hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Units belonging to a file.
    File(FileId),
    /// Unused units.
    Free,
}

/// A run of contiguous, identically-kind disk units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(super) kind: BlockKind,
    pub(super) length: u64,
    pub(super) prev: Option<BlockId>,
    pub(super) next: Option<BlockId>,
}

#[allow(clippy::len_without_is_empty)]
impl Block {
    pub(super) fn new(kind: BlockKind, length: u64) -> Self {
        Self {
            kind,
            length,
            prev: None,
            next: None,
        }
    }

    /// Kind of the run.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Number of units in the run (always at least 1).
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Check if this is a Free run.
    pub fn is_free(&self) -> bool {
        matches!(self.kind, BlockKind::Free)
    }

    /// File identifier, if this is a File run.
    pub fn file_id(&self) -> Option<FileId> {
        match self.kind {
            BlockKind::File(id) => Some(id),
            BlockKind::Free => None,
        }
    }

    /// Handle of the preceding block.
    pub fn prev(&self) -> Option<BlockId> {
        self.prev
    }

    /// Handle of the following block.
    pub fn next(&self) -> Option<BlockId> {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_block() {
        let block = Block::new(BlockKind::File(7), 3);

        assert!(!block.is_free());
        assert_eq!(block.file_id(), Some(7));
        assert_eq!(block.len(), 3);
        assert!(block.prev().is_none());
        assert!(block.next().is_none());
    }

    #[test]
    fn test_free_block() {
        let block = Block::new(BlockKind::Free, 4);

        assert!(block.is_free());
        assert_eq!(block.file_id(), None);
    }

    #[test]
    fn test_block_id_display() {
        assert_eq!(BlockId::new(12).to_string(), "#12");
    }
}
