//! Disk model: runs of File and Free units in an ordered block list.
//!
//! This module handles:
//! - The block arena and its structural primitives
//! - Decoding the run-length disk map into an initial disk

mod block;
mod decode;
mod list;

pub use block::{Block, BlockId, BlockKind, FileId};
pub use decode::{load_disk, read_disk};
pub use list::{Disk, Iter};
