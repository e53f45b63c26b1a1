//! Error types for the disk compactor.

use crate::config::CompactionPolicy;
use crate::disk::BlockId;
use thiserror::Error;

/// Result type alias for disk compactor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, compacting or verifying a disk.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the disk map.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The disk map line was empty.
    #[error("Empty disk map: expected at least one digit")]
    EmptyInput,

    /// The disk map contained something other than a decimal digit.
    #[error("Invalid character {found:?} at offset {offset}: expected a digit 0-9")]
    InvalidDigit { offset: usize, found: char },

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A computed checksum did not match the expected value.
    #[error("Checksum mismatch for {policy}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        policy: CompactionPolicy,
        expected: u64,
        actual: u64,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Structural corruption of a [`Disk`](crate::disk::Disk).
///
/// These are never expected at runtime. The structural primitives panic when
/// they observe one, since no caller can recover a corrupted block list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A handle points at a slot whose block was already excised.
    #[error("block {0} is not live")]
    DeadBlock(BlockId),

    /// A linked block has zero length.
    #[error("block {0} has zero length")]
    EmptyBlock(BlockId),

    /// Two Free blocks sit next to each other.
    #[error("free blocks {0} and {1} are adjacent")]
    AdjacentFree(BlockId, BlockId),

    /// Forward and backward links disagree.
    #[error("broken link between {from} and {to}")]
    BrokenLink { from: BlockId, to: BlockId },

    /// Head or tail does not match the ends of the chain.
    #[error("head/tail do not match the block chain")]
    EndsMismatch,

    /// Live slots that are not reachable from the head.
    #[error("{live} live blocks but {linked} reachable from head")]
    Unlinked { live: usize, linked: usize },

    /// The block lengths no longer add up to the recorded capacity.
    #[error("capacity drift: recorded {recorded}, blocks sum to {actual}")]
    CapacityDrift { recorded: u64, actual: u64 },

    /// The cached first Free block is not the earliest Free block.
    #[error("first-free cache holds {cached:?}, earliest free block is {actual:?}")]
    StaleFirstFree {
        cached: Option<BlockId>,
        actual: Option<BlockId>,
    },
}
