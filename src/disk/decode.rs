//! Decoding of the run-length disk map.

use super::block::BlockKind;
use super::list::Disk;
use crate::error::{Error, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

impl Disk {
    /// Decode a disk map line.
    ///
    /// Digits alternate between File and Free run lengths, starting with a
    /// File run. File identifiers are assigned sequentially from 0, one per
    /// File run. Zero-length runs create no block but still consume their
    /// identifier. A single trailing line terminator is ignored.
    pub fn decode(line: &str) -> Result<Disk> {
        let line = match line.strip_suffix('\n') {
            Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
            None => line,
        };
        if line.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut disk = Disk::new();
        let mut next_file = 0;
        for (index, (offset, found)) in line.char_indices().enumerate() {
            let length = found
                .to_digit(10)
                .ok_or(Error::InvalidDigit { offset, found })? as u64;

            let kind = if index % 2 == 0 {
                next_file += 1;
                BlockKind::File(next_file - 1)
            } else {
                BlockKind::Free
            };
            if length > 0 {
                disk.append(kind, length);
            }
        }

        debug!(
            blocks = disk.block_count(),
            capacity = disk.capacity(),
            files = next_file,
            "decoded disk map"
        );
        Ok(disk)
    }
}

impl FromStr for Disk {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Disk::decode(s)
    }
}

/// Decode the first line read from `reader`.
pub fn read_disk<R: Read>(mut reader: R) -> Result<Disk> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Disk::decode(content.lines().next().unwrap_or(""))
}

/// Decode the first line of the file at `path`.
pub fn load_disk(path: &Path) -> Result<Disk> {
    let content = fs::read_to_string(path)?;
    Disk::decode(content.lines().next().unwrap_or(""))
}
