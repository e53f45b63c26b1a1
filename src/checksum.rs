//! Position-weighted checksum over a disk layout.

use crate::disk::{BlockKind, Disk};

/// Compute the checksum of a disk.
///
/// Walks the blocks from head to tail with a unit position starting at 0.
/// Free units only advance the position; every File unit adds
/// `file id × position`. Fragments of the same file are summed independently,
/// so the result depends only on the final per-unit layout.
pub fn checksum(disk: &Disk) -> u64 {
    let mut sum = 0u64;
    let mut position = 0u64;

    for (_, block) in disk.iter() {
        let length = block.len();
        if let BlockKind::File(id) = block.kind() {
            // Positions position..position+length-1 summed in closed form.
            let positions = length * (2 * position + length - 1) / 2;
            sum += id * positions;
        }
        position += length;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit-by-unit reference used to cross-check the closed form.
    fn naive(disk: &Disk) -> u64 {
        disk.units()
            .iter()
            .enumerate()
            .filter_map(|(pos, unit)| unit.map(|id| id * pos as u64))
            .sum()
    }

    #[test]
    fn test_checksum_uncompacted() {
        let disk = Disk::decode("12345").unwrap();

        // 0..111....22222
        let expected = (3 + 4 + 5) + 2 * (10 + 11 + 12 + 13 + 14);
        assert_eq!(checksum(&disk), expected);
        assert_eq!(checksum(&disk), naive(&disk));
    }

    #[test]
    fn test_checksum_matches_naive() {
        let disk = Disk::decode("2333133121414131402").unwrap();
        assert_eq!(checksum(&disk), naive(&disk));
    }

    #[test]
    fn test_checksum_empty_disk() {
        assert_eq!(checksum(&Disk::new()), 0);
    }

    #[test]
    fn test_checksum_large_positions() {
        let mut disk = Disk::new();
        disk.append(BlockKind::Free, 9);
        for id in 0..2_000u64 {
            disk.append(BlockKind::File(id), 100);
        }

        let value = checksum(&disk);
        assert!(value > 10_000_000_000_000);
        assert_eq!(value, naive(&disk));
    }
}
