//! The disk: an arena-backed doubly-linked list of blocks.
//!
//! Blocks live in a slot vector and link to each other through [`BlockId`]
//! handles. Excised blocks leave an empty slot behind, so a handle never
//! silently starts naming a different block.
//!
//! Every structural primitive leaves the list in a state where:
//!
//! - the block lengths add up to the recorded capacity,
//! - no two Free blocks are adjacent,
//! - every linked block has a length of at least 1,
//! - the first-Free cache, when populated, names the earliest Free block.

use super::block::{Block, BlockId, BlockKind, FileId};
use crate::config::FREE_GLYPH;
use crate::error::InvariantViolation;
use std::fmt;

/// State of the first-Free lookup cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FirstFree {
    /// The earliest Free block, or `None` when the disk has no Free block.
    Cached(Option<BlockId>),
    /// Needs a rescan. No Free block lies strictly before `resume`
    /// (the scan starts at the head when `resume` is `None`).
    Stale { resume: Option<BlockId> },
}

/// An ordered sequence of blocks with exclusive ownership of each of them.
#[derive(Debug, Clone)]
pub struct Disk {
    slots: Vec<Option<Block>>,
    head: Option<BlockId>,
    tail: Option<BlockId>,
    first_free: FirstFree,
    capacity: u64,
    live: usize,
}

impl Default for Disk {
    fn default() -> Self {
        Self::new()
    }
}

impl Disk {
    /// Create an empty disk.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            first_free: FirstFree::Cached(None),
            capacity: 0,
            live: 0,
        }
    }

    /// First block of the disk.
    pub fn head(&self) -> Option<BlockId> {
        self.head
    }

    /// Last block of the disk.
    pub fn tail(&self) -> Option<BlockId> {
        self.tail
    }

    /// Look up a live block.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Check whether `id` still names a block of this disk.
    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Block following `id`.
    pub fn next(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).next
    }

    /// Block preceding `id`.
    pub fn prev(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).prev
    }

    /// Total number of units on the disk.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of blocks currently linked.
    pub fn block_count(&self) -> usize {
        self.live
    }

    /// Check if the disk holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of Free units.
    pub fn free_units(&self) -> u64 {
        self.iter()
            .filter(|(_, block)| block.is_free())
            .map(|(_, block)| block.length)
            .sum()
    }

    /// Iterate over the blocks from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            disk: self,
            cursor: self.head,
        }
    }

    /// Per-unit layout from head to tail: the owning file, or `None` for Free.
    pub fn units(&self) -> Vec<Option<FileId>> {
        let mut units = Vec::with_capacity(self.capacity as usize);
        for (_, block) in self.iter() {
            for _ in 0..block.length {
                units.push(block.file_id());
            }
        }
        units
    }

    /// The earliest Free block.
    ///
    /// Served from the cache when it is populated, otherwise recomputed by a
    /// forward scan and cached again.
    pub fn first_free(&mut self) -> Option<BlockId> {
        match self.first_free {
            FirstFree::Cached(found) => found,
            FirstFree::Stale { resume } => {
                let found = self.scan_free(resume.or(self.head), None);
                self.first_free = FirstFree::Cached(found);
                found
            }
        }
    }

    /// The last File block.
    ///
    /// Since Free blocks are never adjacent, this is either the tail or the
    /// block right before a Free tail.
    pub fn last_file(&self) -> Option<BlockId> {
        let tail = self.tail?;
        if self.block(tail).is_free() {
            self.block(tail).prev
        } else {
            Some(tail)
        }
    }

    /// Earliest Free block at or after `from`, stopping before `until`.
    pub fn scan_free(&self, from: Option<BlockId>, until: Option<BlockId>) -> Option<BlockId> {
        let mut cursor = from;
        while let Some(id) = cursor {
            if Some(id) == until {
                return None;
            }
            let block = self.block(id);
            if block.is_free() {
                return Some(id);
            }
            cursor = block.next;
        }
        None
    }

    /// Check whether `a` lies strictly before `b`.
    pub fn precedes(&self, a: BlockId, b: BlockId) -> bool {
        let mut cursor = self.block(a).next;
        while let Some(id) = cursor {
            if id == b {
                return true;
            }
            cursor = self.block(id).next;
        }
        false
    }

    /// Append a run at the tail.
    ///
    /// A Free run appended after a Free tail is merged into it. Returns the
    /// handle of the block holding the appended units.
    pub fn append(&mut self, kind: BlockKind, length: u64) -> BlockId {
        assert!(length > 0, "cannot append a zero-length block");
        self.capacity += length;

        if kind == BlockKind::Free {
            if let Some(tail) = self.tail.filter(|&t| self.block(t).is_free()) {
                self.block_mut(tail).length += length;
                self.validate();
                return tail;
            }
        }

        let id = self.alloc(kind, length);
        self.attach_tail(id);
        if kind == BlockKind::Free && self.first_free == FirstFree::Cached(None) {
            self.first_free = FirstFree::Cached(Some(id));
        }
        self.validate();
        id
    }

    /// Splice a new run immediately before `target`.
    ///
    /// A Free run is merged with any Free neighbor. Returns the handle of the
    /// block holding the inserted units.
    pub fn insert_before(&mut self, kind: BlockKind, length: u64, target: BlockId) -> BlockId {
        assert!(length > 0, "cannot insert a zero-length block");
        self.assert_live(target);
        self.capacity += length;

        let id = self.alloc(kind, length);
        self.attach_before(id, target);
        let id = match kind {
            BlockKind::Free => {
                let survivor = self.coalesce(id);
                if survivor == id {
                    self.note_new_free(id);
                }
                survivor
            }
            BlockKind::File(_) => id,
        };
        self.validate();
        id
    }

    /// Excise `id`, reconnecting its neighbors.
    ///
    /// When both former neighbors are Free they are merged into one block.
    pub fn remove(&mut self, id: BlockId) -> Block {
        self.assert_live(id);
        let (prev, next) = {
            let block = self.block(id);
            (block.prev, block.next)
        };

        self.detach(id);
        let block = self.release(id);
        self.capacity -= block.length;

        if let (Some(prev), Some(next)) = (prev, next) {
            if self.block(prev).is_free() && self.block(next).is_free() {
                self.absorb(prev, next);
            }
        }
        self.validate();
        block
    }

    /// Relocate the File block `source` into the Free block `destination`.
    ///
    /// When `destination` can hold the whole source, the source moves there
    /// in full: it takes the destination's leading units, the destination
    /// shrinks (or disappears), and the vacated units become Free. Otherwise
    /// the destination is fully consumed by a new File block peeled off the
    /// end of the source, which keeps its position and shrinks.
    ///
    /// Either block may come first. Both compaction policies move leftward.
    ///
    /// Returns the number of units moved.
    pub fn move_blocks(&mut self, source: BlockId, destination: BlockId) -> u64 {
        let (src_kind, src_len) = {
            let block = self.block(source);
            (block.kind, block.length)
        };
        let dst_len = {
            let block = self.block(destination);
            assert!(block.is_free(), "move destination {} is not free", destination);
            block.length
        };
        let file_id = match src_kind {
            BlockKind::File(id) => id,
            BlockKind::Free => panic!("move source {} is not a file", source),
        };

        // Walks forward from the source, which is short when the source sits
        // near the tail as in fragmenting compaction.
        let rightward = self.precedes(source, destination);

        // Moving leftward, the Free units created here lie after
        // `destination`, which is at or after the earliest Free block, so the
        // first-Free cache only needs attention when `destination` is
        // excised. Moving rightward they may land before the cached block.
        let (moved, freed) = if dst_len >= src_len {
            let hole = self.alloc(BlockKind::Free, src_len);
            self.attach_before(hole, source);
            self.detach(source);
            self.attach_before(source, destination);
            if dst_len == src_len {
                self.detach(destination);
                self.release(destination);
            } else {
                self.block_mut(destination).length -= src_len;
            }
            (src_len, self.coalesce(hole))
        } else {
            let piece = self.alloc(BlockKind::File(file_id), dst_len);
            self.attach_before(piece, destination);
            self.detach(destination);
            self.release(destination);
            self.block_mut(source).length -= dst_len;
            let gap = self.alloc(BlockKind::Free, dst_len);
            self.attach_after(gap, source);
            (dst_len, self.coalesce(gap))
        };
        if rightward {
            self.note_new_free(freed);
        }

        self.validate();
        moved
    }

    /// Validate every structural invariant.
    ///
    /// Debug builds run this after every structural primitive. Release builds
    /// skip the full scan and rely on the adjacency assertion made after each
    /// Free-block merge, plus the dead-handle and zero-length checks.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut linked = 0usize;
        let mut total = 0u64;
        let mut earliest_free = None;
        let mut prev: Option<BlockId> = None;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            let block = self.get(id).ok_or(InvariantViolation::DeadBlock(id))?;
            if block.prev != prev {
                return Err(InvariantViolation::BrokenLink {
                    from: prev.unwrap_or(id),
                    to: id,
                });
            }
            if block.length == 0 {
                return Err(InvariantViolation::EmptyBlock(id));
            }
            if let Some(p) = prev {
                if block.is_free() && self.block(p).is_free() {
                    return Err(InvariantViolation::AdjacentFree(p, id));
                }
            }
            if block.is_free() && earliest_free.is_none() {
                earliest_free = Some(id);
            }

            linked += 1;
            total += block.length;
            prev = Some(id);
            cursor = block.next;
        }

        if prev != self.tail || (self.head.is_none() != self.tail.is_none()) {
            return Err(InvariantViolation::EndsMismatch);
        }
        if linked != self.live || self.slots.iter().flatten().count() != self.live {
            return Err(InvariantViolation::Unlinked {
                live: self.slots.iter().flatten().count(),
                linked,
            });
        }
        if total != self.capacity {
            return Err(InvariantViolation::CapacityDrift {
                recorded: self.capacity,
                actual: total,
            });
        }

        match self.first_free {
            FirstFree::Cached(cached) if cached != earliest_free => {
                Err(InvariantViolation::StaleFirstFree {
                    cached,
                    actual: earliest_free,
                })
            }
            FirstFree::Stale { resume: Some(resume) } => {
                if !self.contains(resume) {
                    return Err(InvariantViolation::DeadBlock(resume));
                }
                match earliest_free {
                    Some(free) if free != resume && self.precedes(free, resume) => {
                        Err(InvariantViolation::StaleFirstFree {
                            cached: Some(resume),
                            actual: Some(free),
                        })
                    }
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    /// Full invariant check after a primitive, in debug builds.
    fn validate(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                panic!("disk invariant violated: {}", violation);
            }
        }
    }

    fn block(&self, id: BlockId) -> &Block {
        match self.get(id) {
            Some(block) => block,
            None => panic!("{}", InvariantViolation::DeadBlock(id)),
        }
    }

    fn block_mut(&mut self, id: BlockId) -> &mut Block {
        match self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            Some(block) => block,
            None => panic!("{}", InvariantViolation::DeadBlock(id)),
        }
    }

    fn assert_live(&self, id: BlockId) {
        self.block(id);
    }

    fn alloc(&mut self, kind: BlockKind, length: u64) -> BlockId {
        let id = BlockId::new(self.slots.len());
        self.slots.push(Some(Block::new(kind, length)));
        self.live += 1;
        id
    }

    fn release(&mut self, id: BlockId) -> Block {
        match self.slots.get_mut(id.index()).and_then(Option::take) {
            Some(block) => {
                self.live -= 1;
                block
            }
            None => panic!("{}", InvariantViolation::DeadBlock(id)),
        }
    }

    /// Unlink `id` from its neighbors, leaving the slot alive.
    fn detach(&mut self, id: BlockId) {
        let (prev, next) = {
            let block = self.block(id);
            (block.prev, block.next)
        };

        match self.first_free {
            FirstFree::Cached(Some(first)) if first == id => {
                self.first_free = FirstFree::Stale { resume: prev };
            }
            FirstFree::Stale { resume: Some(resume) } if resume == id => {
                self.first_free = FirstFree::Stale { resume: None };
            }
            _ => {}
        }

        match prev {
            Some(p) => self.block_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.block_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let block = self.block_mut(id);
        block.prev = None;
        block.next = None;
    }

    fn attach_before(&mut self, id: BlockId, target: BlockId) {
        let prev = self.block(target).prev;
        {
            let block = self.block_mut(id);
            block.prev = prev;
            block.next = Some(target);
        }
        self.block_mut(target).prev = Some(id);
        match prev {
            Some(p) => self.block_mut(p).next = Some(id),
            None => self.head = Some(id),
        }
    }

    fn attach_after(&mut self, id: BlockId, target: BlockId) {
        let next = self.block(target).next;
        {
            let block = self.block_mut(id);
            block.prev = Some(target);
            block.next = next;
        }
        self.block_mut(target).next = Some(id);
        match next {
            Some(n) => self.block_mut(n).prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    fn attach_tail(&mut self, id: BlockId) {
        match self.tail {
            Some(tail) => self.attach_after(id, tail),
            None => {
                self.head = Some(id);
                self.tail = Some(id);
            }
        }
    }

    /// Fold the Free block `gone` into its Free predecessor `keep`.
    fn absorb(&mut self, keep: BlockId, gone: BlockId) {
        let was_first = self.first_free == FirstFree::Cached(Some(gone));
        let length = self.block(gone).length;
        self.detach(gone);
        self.release(gone);
        self.block_mut(keep).length += length;
        if was_first {
            self.first_free = FirstFree::Cached(Some(keep));
        }
    }

    /// Merge the Free block `id` with its Free neighbors; returns the survivor.
    fn coalesce(&mut self, id: BlockId) -> BlockId {
        let mut survivor = id;
        if let Some(prev) = self.block(id).prev {
            if self.block(prev).is_free() {
                self.absorb(prev, id);
                survivor = prev;
            }
        }
        if let Some(next) = self.block(survivor).next {
            if self.block(next).is_free() {
                self.absorb(survivor, next);
            }
        }

        let block = self.block(survivor);
        let isolated = block.prev.map_or(true, |p| !self.block(p).is_free())
            && block.next.map_or(true, |n| !self.block(n).is_free());
        assert!(isolated, "free block {} still has a free neighbor", survivor);
        survivor
    }

    /// Record a Free block whose position relative to the cached one is unknown.
    fn note_new_free(&mut self, id: BlockId) {
        self.first_free = match self.first_free {
            FirstFree::Cached(None) => FirstFree::Cached(Some(id)),
            FirstFree::Cached(Some(first)) if first == id => FirstFree::Cached(Some(id)),
            _ => FirstFree::Stale { resume: None },
        };
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, block) in self.iter() {
            for _ in 0..block.length {
                match block.kind {
                    BlockKind::File(id) => write!(f, "{}", id)?,
                    BlockKind::Free => write!(f, "{}", FREE_GLYPH)?,
                }
            }
        }
        Ok(())
    }
}

/// Head-to-tail iterator over a disk's blocks.
#[derive(Debug)]
pub struct Iter<'a> {
    disk: &'a Disk,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let block = self.disk.block(id);
        self.cursor = block.next;
        Some((id, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(disk: &Disk) -> Vec<(BlockKind, u64)> {
        disk.iter().map(|(_, b)| (b.kind(), b.len())).collect()
    }

    fn sample() -> Disk {
        // 0..111....22222
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        disk.append(BlockKind::Free, 2);
        disk.append(BlockKind::File(1), 3);
        disk.append(BlockKind::Free, 4);
        disk.append(BlockKind::File(2), 5);
        disk
    }

    #[test]
    fn test_append_links_blocks() {
        let disk = sample();

        assert_eq!(disk.block_count(), 5);
        assert_eq!(disk.capacity(), 15);
        assert_eq!(disk.to_string(), "0..111....22222");
        assert!(disk.check_invariants().is_ok());
    }

    #[test]
    fn test_append_merges_free_tail() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 2);
        let first = disk.append(BlockKind::Free, 1);
        let second = disk.append(BlockKind::Free, 3);

        assert_eq!(first, second);
        assert_eq!(disk.block_count(), 2);
        assert_eq!(disk.get(first).unwrap().len(), 4);
    }

    #[test]
    fn test_first_free_tracks_append() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 2);
        assert_eq!(disk.first_free(), None);

        let free = disk.append(BlockKind::Free, 1);
        disk.append(BlockKind::File(1), 1);
        disk.append(BlockKind::Free, 1);
        assert_eq!(disk.first_free(), Some(free));
    }

    #[test]
    fn test_insert_before_head() {
        let mut disk = sample();
        let head = disk.head().unwrap();
        let id = disk.insert_before(BlockKind::File(9), 2, head);

        assert_eq!(disk.head(), Some(id));
        assert_eq!(disk.to_string(), "990..111....22222");
        assert_eq!(disk.capacity(), 17);
    }

    #[test]
    fn test_insert_free_merges_neighbors() {
        let mut disk = sample();
        // Insert free right after the first free run: before file 1.
        let file1 = disk.iter().find(|(_, b)| b.file_id() == Some(1)).unwrap().0;
        let first_free = disk.first_free().unwrap();
        let id = disk.insert_before(BlockKind::Free, 2, file1);

        assert_eq!(id, first_free);
        assert_eq!(disk.get(id).unwrap().len(), 4);
        assert_eq!(disk.to_string(), "0....111....22222");
    }

    #[test]
    fn test_insert_free_before_cached_first_free() {
        let mut disk = sample();
        let head = disk.head().unwrap();
        let id = disk.insert_before(BlockKind::Free, 1, head);

        assert_eq!(disk.first_free(), Some(id));
        assert!(disk.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_merges_free_neighbors() {
        let mut disk = sample();
        let file1 = disk.iter().find(|(_, b)| b.file_id() == Some(1)).unwrap().0;
        let removed = disk.remove(file1);

        assert_eq!(removed.file_id(), Some(1));
        assert!(!disk.contains(file1));
        assert_eq!(
            kinds(&disk),
            vec![
                (BlockKind::File(0), 1),
                (BlockKind::Free, 6),
                (BlockKind::File(2), 5),
            ]
        );
        assert_eq!(disk.capacity(), 12);
    }

    #[test]
    fn test_remove_cached_first_free_rescans() {
        let mut disk = sample();
        let first = disk.first_free().unwrap();
        disk.remove(first);

        let next = disk.first_free().unwrap();
        assert_eq!(disk.get(next).unwrap().len(), 4);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut disk = sample();
        let head = disk.head().unwrap();
        let tail = disk.tail().unwrap();
        disk.remove(head);
        disk.remove(tail);

        assert_eq!(disk.to_string(), "..111....");
        assert!(disk.get(disk.head().unwrap()).unwrap().is_free());
    }

    #[test]
    fn test_move_partial_peels_source_tail() {
        let mut disk = sample();
        disk.append(BlockKind::Free, 1);
        let free = disk.first_free().unwrap();
        let source = disk.last_file().unwrap();

        // A free run of 2 cannot hold 5 units: 2 are peeled off the end of file 2.
        let moved = disk.move_blocks(source, free);

        assert_eq!(moved, 2);
        assert_eq!(disk.to_string(), "022111....222...");
        assert!(disk.contains(source));
        assert_eq!(disk.get(source).unwrap().len(), 3);
        assert!(!disk.contains(free));
        assert_eq!(disk.capacity(), 16);
    }

    #[test]
    fn test_move_full_block_shrinks_destination() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        let free = disk.append(BlockKind::Free, 5);
        disk.append(BlockKind::File(1), 2);
        let source = disk.append(BlockKind::File(2), 3);

        let moved = disk.move_blocks(source, free);

        assert_eq!(moved, 3);
        assert_eq!(disk.to_string(), "0222..11...");
        assert!(disk.contains(source));
        assert_eq!(disk.first_free(), Some(free));
        assert_eq!(disk.capacity(), 11);
    }

    #[test]
    fn test_move_full_block_exact_fit_merges_hole() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        let free = disk.append(BlockKind::Free, 2);
        let source = disk.append(BlockKind::File(1), 2);
        disk.append(BlockKind::Free, 1);

        disk.move_blocks(source, free);

        assert!(!disk.contains(free));
        assert_eq!(
            kinds(&disk),
            vec![
                (BlockKind::File(0), 1),
                (BlockKind::File(1), 2),
                (BlockKind::Free, 3),
            ]
        );
        let first = disk.first_free().unwrap();
        assert_eq!(disk.get(first).unwrap().len(), 3);
    }

    #[test]
    fn test_move_into_adjacent_free() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        let free = disk.append(BlockKind::Free, 3);
        let source = disk.append(BlockKind::File(1), 2);
        disk.append(BlockKind::File(2), 1);

        disk.move_blocks(source, free);

        assert_eq!(disk.to_string(), "011...2");
        assert_eq!(disk.block_count(), 4);
    }

    #[test]
    fn test_move_rightward_updates_first_free() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        let source = disk.append(BlockKind::File(1), 2);
        disk.append(BlockKind::File(2), 1);
        let free = disk.append(BlockKind::Free, 4);
        assert_eq!(disk.first_free(), Some(free));

        let moved = disk.move_blocks(source, free);

        assert_eq!(moved, 2);
        assert_eq!(disk.to_string(), "0..211..");
        let first = disk.first_free().unwrap();
        assert_eq!(Some(first), disk.scan_free(disk.head(), None));
        assert_eq!(disk.prev(first), disk.head());
        assert!(disk.check_invariants().is_ok());
    }

    #[test]
    fn test_move_rightward_partial_updates_first_free() {
        let mut disk = Disk::new();
        disk.append(BlockKind::File(0), 1);
        let source = disk.append(BlockKind::File(1), 3);
        disk.append(BlockKind::File(2), 1);
        let free = disk.append(BlockKind::Free, 2);
        assert_eq!(disk.first_free(), Some(free));

        let moved = disk.move_blocks(source, free);

        assert_eq!(moved, 2);
        assert_eq!(disk.to_string(), "01..211");
        let first = disk.first_free().unwrap();
        assert_eq!(disk.get(first).unwrap().len(), 2);
        assert_eq!(disk.prev(first), Some(source));
        assert!(disk.check_invariants().is_ok());
    }

    #[test]
    fn test_last_file_skips_free_tail() {
        let mut disk = sample();
        let tail = disk.tail().unwrap();
        assert_eq!(disk.last_file(), Some(tail));

        disk.append(BlockKind::Free, 2);
        assert_eq!(disk.last_file(), Some(tail));
    }

    #[test]
    fn test_check_invariants_detects_adjacent_free() {
        let mut disk = sample();
        // Corrupt the chain on purpose by retyping a file between two free runs.
        let file1 = disk.iter().find(|(_, b)| b.file_id() == Some(1)).unwrap().0;
        disk.slots[file1.index()].as_mut().unwrap().kind = BlockKind::Free;

        assert!(matches!(
            disk.check_invariants(),
            Err(InvariantViolation::AdjacentFree(_, _))
        ));
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_dead_handle_panics() {
        let mut disk = sample();
        let head = disk.head().unwrap();
        disk.remove(head);
        disk.remove(head);
    }
}
