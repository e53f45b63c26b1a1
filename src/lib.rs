//! Disk Compactor
//!
//! Simulates defragmentation of a storage medium described as an ordered
//! sequence of contiguous block runs, each run holding either one file's
//! units or free space.
//!
//! # Features
//!
//! - **Block list**: arena-backed doubly-linked runs with merge/split/move primitives
//! - **Fragmenting compaction**: fill the earliest free space from the tail, splitting files
//! - **Whole-file compaction**: move each file once, in full, into the leftmost fitting gap
//! - **Checksum**: position-weighted sum over the final layout
//!
//! # Architecture
//!
//! ```text
//! Disk map → Decode (Disk) → Compact (one policy) → Checksum
//! ```
//!
//! # Example
//!
//! ```rust
//! use disk_compactor::checksum::checksum;
//! use disk_compactor::compact::{Compactor, FragmentingCompactor};
//! use disk_compactor::disk::Disk;
//!
//! let disk: Disk = "12345".parse().unwrap();
//! let mut compactor = FragmentingCompactor::new(disk);
//! compactor.compact();
//!
//! assert_eq!(compactor.disk().to_string(), "022111222......");
//! assert_eq!(checksum(compactor.disk()), 60);
//! ```

pub mod checksum;
pub mod compact;
pub mod config;
pub mod disk;
pub mod engine;
pub mod error;

pub use compact::{Compactor, CompactionStats};
pub use config::{CompactionPolicy, RunConfig};
pub use disk::Disk;
pub use engine::{outcomes_to_json, run, run_disk, verify, PolicyOutcome};
pub use error::{Error, Result};
