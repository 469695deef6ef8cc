//! # block-deque
//!
//! A double-ended queue stored as a growable map of fixed-size blocks.
//!
//! Elements live in blocks of `B` slots. A map of block slots sits above them,
//! so pushing at either end never moves existing elements: a full edge block
//! gets a fresh neighbour, and a full map is doubled with the live blocks
//! moved (not copied) into its middle.
//!
//! ## Example
//!
//! ```rust
//! use block_deque::{BlockDeque, DequeError};
//!
//! let mut d: BlockDeque<u64> = BlockDeque::new();
//! d.push_back(1);
//! d.push_back(2);
//! d.push_front(0);
//!
//! assert_eq!(d.front(), Ok(&0));
//! assert_eq!(d.back(), Ok(&2));
//! assert_eq!(d.len(), 3);
//!
//! assert_eq!(d.pop_back(), Ok(2));
//! d.clear();
//! assert_eq!(d.pop_front(), Err(DequeError::Underflow));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod repl;
pub mod stack;

pub use error::{DequeError, Result};
pub use stack::Stack;

use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

// =============================================================================
// Configuration
// =============================================================================

/// Slots per block unless a different `B` is chosen.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Map slots allocated by [`BlockDeque::new`].
pub const INITIAL_MAP_LEN: usize = 8;

/// Below two slots a centred block has no neighbour on one side.
const MIN_MAP_LEN: usize = 2;

// =============================================================================
// Block storage
// =============================================================================

/// Fixed-capacity storage owned by exactly one map slot.
///
/// Slots outside the live range are always `None`, so dropping a block drops
/// exactly the elements it still holds.
#[derive(Clone)]
struct Block<T> {
    slots: Box<[Option<T>]>,
}

impl<T> Block<T> {
    fn new(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    fn try_new(len: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(len)?;
        slots.resize_with(len, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }
}

/// Two-level address: map slot, then slot within that block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    block: usize,
    offset: usize,
}

impl Cursor {
    /// Step one slot forward. Reaching `b` carries into the next block;
    /// returns whether it did.
    #[inline]
    fn advance(&mut self, b: usize) -> bool {
        self.offset += 1;
        if self.offset < b {
            return false;
        }
        self.block += 1;
        self.offset = 0;
        true
    }

    /// Step one slot back. Reaching 0 borrows from the previous block, as
    /// its one-past-the-end position; returns whether it did.
    #[inline]
    fn retreat(&mut self, b: usize) -> bool {
        self.offset -= 1;
        if self.offset > 0 {
            return false;
        }
        self.block -= 1;
        self.offset = b;
        true
    }

    /// Position of the slot just before this one in the same block.
    #[inline]
    fn prev_slot(self) -> Cursor {
        debug_assert!(self.offset > 0);
        Cursor {
            block: self.block,
            offset: self.offset - 1,
        }
    }
}

// =============================================================================
// BlockDeque
// =============================================================================

/// Double-ended queue over a map of `B`-slot blocks.
///
/// `start` addresses the first live element and `end` one past the last.
/// Every map slot in `start.block..=end.block` owns a block and every other
/// slot is empty. While more than one block is live, `start.offset < B` and
/// `end.offset > 0`.
pub struct BlockDeque<T, const B: usize = DEFAULT_BLOCK_SIZE> {
    map: Vec<Option<Block<T>>>,
    start: Cursor,
    end: Cursor,
    count: usize,
}

impl<T, const B: usize> BlockDeque<T, B> {
    const NONZERO_BLOCK: () = assert!(B > 0, "block size must be non-zero");

    /// Create an empty deque with [`INITIAL_MAP_LEN`] map slots and one block.
    pub fn new() -> Self {
        Self::with_map_len(INITIAL_MAP_LEN)
    }

    /// Create an empty deque whose map starts with `map_len` slots.
    ///
    /// Values below 2 are raised to 2.
    pub fn with_map_len(map_len: usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_BLOCK;

        let map_len = map_len.max(MIN_MAP_LEN);
        let mut map: Vec<Option<Block<T>>> =
            std::iter::repeat_with(|| None).take(map_len).collect();
        let center = Cursor {
            block: map_len / 2,
            offset: B / 2,
        };
        map[center.block] = Some(Block::new(B));
        Self {
            map,
            start: center,
            end: center,
            count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Element slots spanned by the allocated blocks.
    ///
    /// This counts whole blocks, including slots before the front and after
    /// the back, so it is not the headroom left before the next allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block_count() * B
    }

    /// Number of blocks currently allocated.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.end.block - self.start.block + 1
    }

    /// Number of slots in the block map. Never decreases.
    #[inline]
    pub fn map_len(&self) -> usize {
        self.map.len()
    }

    /// Bytes held by the map and the allocated blocks.
    pub fn memory_usage(&self) -> usize {
        self.map.capacity() * std::mem::size_of::<Option<Block<T>>>()
            + self.capacity() * std::mem::size_of::<Option<T>>()
    }

    // -------------------------------------------------------------------------
    // Ends
    // -------------------------------------------------------------------------

    /// Append `value` at the back.
    ///
    /// # Panics
    /// Panics if a new block or a larger map cannot be allocated.
    pub fn push_back(&mut self, value: T) {
        if let Err(e) = self.try_push_back(value) {
            panic!("BlockDeque::push_back: {}", e);
        }
    }

    /// Prepend `value` at the front.
    ///
    /// # Panics
    /// Panics if a new block or a larger map cannot be allocated.
    pub fn push_front(&mut self, value: T) {
        if let Err(e) = self.try_push_front(value) {
            panic!("BlockDeque::push_front: {}", e);
        }
    }

    /// Append `value` at the back, reporting allocation failure.
    ///
    /// On error the deque is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        self.reserve_back()?;
        let at = self.end;
        self.block_mut(at.block).slots[at.offset] = Some(value);
        self.end.offset += 1;
        self.count += 1;
        Ok(())
    }

    /// Prepend `value` at the front, reporting allocation failure.
    ///
    /// On error the deque is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        self.reserve_front()?;
        self.start.offset -= 1;
        let at = self.start;
        self.block_mut(at.block).slots[at.offset] = Some(value);
        self.count += 1;
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        let value = self.take(self.end.prev_slot());
        self.count -= 1;

        if self.count == 0 {
            self.recenter_empty();
        } else {
            let back = self.end.block;
            if self.end.retreat(B) {
                self.map[back] = None;
            }
        }
        Ok(value)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        let value = self.take(self.start);
        self.count -= 1;

        if self.count == 0 {
            self.recenter_empty();
        } else {
            let front = self.start.block;
            if self.start.advance(B) {
                self.map[front] = None;
            }
        }
        Ok(value)
    }

    pub fn front(&self) -> Result<&T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        Ok(self.slot(self.start))
    }

    pub fn back(&self) -> Result<&T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        Ok(self.slot(self.end.prev_slot()))
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        Ok(self.slot_mut(self.start))
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.count == 0 {
            return Err(DequeError::Underflow);
        }
        Ok(self.slot_mut(self.end.prev_slot()))
    }

    // -------------------------------------------------------------------------
    // Indexed access
    // -------------------------------------------------------------------------

    /// Element `index` positions from the front, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        let at = self.locate(index);
        self.map[at.block].as_ref()?.slots[at.offset].as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.count {
            return None;
        }
        let at = self.locate(index);
        self.map[at.block].as_mut()?.slots[at.offset].as_mut()
    }

    /// Drop every element, keeping only the front block and the map.
    pub fn clear(&mut self) {
        let keep = self.start.block;
        for slot in &mut self.map[keep + 1..=self.end.block] {
            *slot = None;
        }
        for value in self.block_mut(keep).slots.iter_mut() {
            *value = None;
        }
        self.end.block = keep;
        self.count = 0;
        self.recenter_empty();
    }

    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter {
            deque: self,
            head: 0,
            tail: self.count,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, last) = (self.start.block, self.end.block);
        IterMut {
            blocks: self.map[first..=last].iter_mut(),
            head: Default::default(),
            tail: Default::default(),
            remaining: self.count,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    #[inline]
    fn locate(&self, index: usize) -> Cursor {
        let abs = self.start.offset + index;
        Cursor {
            block: self.start.block + abs / B,
            offset: abs % B,
        }
    }

    #[inline]
    fn block_mut(&mut self, index: usize) -> &mut Block<T> {
        match &mut self.map[index] {
            Some(block) => block,
            None => unreachable!("live map slot {} has no block", index),
        }
    }

    fn slot(&self, at: Cursor) -> &T {
        match self.map[at.block].as_ref().and_then(|b| b.slots[at.offset].as_ref()) {
            Some(value) => value,
            None => unreachable!("live position {:?} is vacant", at),
        }
    }

    fn slot_mut(&mut self, at: Cursor) -> &mut T {
        match self.block_mut(at.block).slots[at.offset].as_mut() {
            Some(value) => value,
            None => unreachable!("live position {:?} is vacant", at),
        }
    }

    fn take(&mut self, at: Cursor) -> T {
        match self.block_mut(at.block).slots[at.offset].take() {
            Some(value) => value,
            None => unreachable!("live position {:?} is vacant", at),
        }
    }

    /// Reset both cursors to the middle of the single remaining block.
    fn recenter_empty(&mut self) {
        debug_assert_eq!(self.count, 0);
        debug_assert_eq!(self.start.block, self.end.block);
        self.start.offset = B / 2;
        self.end = self.start;
    }

    fn reserve_front(&mut self) -> Result<()> {
        self.reserve_front_with(|| Block::try_new(B))
    }

    fn reserve_back(&mut self) -> Result<()> {
        self.reserve_back_with(|| Block::try_new(B))
    }

    /// Make `start.offset - 1` writable.
    ///
    /// The block is allocated before the map is touched, so a failure at any
    /// step leaves the deque as it was.
    fn reserve_front_with(&mut self, allocate: impl FnOnce() -> Result<Block<T>>) -> Result<()> {
        if self.start.offset > 0 {
            return Ok(());
        }
        if self.count == 0 {
            // Write into the lone empty block from its far edge.
            self.start.offset = B;
            self.end.offset = B;
            return Ok(());
        }
        let block = allocate()?;
        if self.start.block == 0 {
            self.grow_map()?;
        }
        self.start.block -= 1;
        self.map[self.start.block] = Some(block);
        self.start.offset = B;
        Ok(())
    }

    /// Make `end.offset` writable.
    fn reserve_back_with(&mut self, allocate: impl FnOnce() -> Result<Block<T>>) -> Result<()> {
        if self.end.offset < B {
            return Ok(());
        }
        if self.count == 0 {
            self.start.offset = 0;
            self.end.offset = 0;
            return Ok(());
        }
        let block = allocate()?;
        if self.end.block == self.map.len() - 1 {
            self.grow_map()?;
        }
        self.end.block += 1;
        self.map[self.end.block] = Some(block);
        self.end.offset = 0;
        Ok(())
    }

    fn grow_map(&mut self) -> Result<()> {
        self.grow_map_to(self.map.len().saturating_mul(2))
    }

    /// Move the live blocks into the middle of a fresh map of `new_len` slots.
    ///
    /// Only block handles move; element storage is untouched.
    fn grow_map_to(&mut self, new_len: usize) -> Result<()> {
        let span = self.block_count();
        debug_assert!(new_len > self.map.len());

        let mut map: Vec<Option<Block<T>>> = Vec::new();
        map.try_reserve_exact(new_len)?;
        map.resize_with(new_len, || None);

        let shift = (new_len - span) / 2;
        for (i, block) in self
            .map
            .drain(self.start.block..=self.end.block)
            .enumerate()
        {
            map[shift + i] = block;
        }

        self.map = map;
        self.start.block = shift;
        self.end.block = shift + span - 1;
        Ok(())
    }
}

impl<T, const B: usize> Default for BlockDeque<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const B: usize> Clone for BlockDeque<T, B> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            start: self.start,
            end: self.end,
            count: self.count,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.map.clone_from(&source.map);
        self.start = source.start;
        self.end = source.end;
        self.count = source.count;
    }
}

impl<T: std::fmt::Debug, const B: usize> std::fmt::Debug for BlockDeque<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const B: usize> PartialEq for BlockDeque<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const B: usize> Eq for BlockDeque<T, B> {}

impl<T, const B: usize> Index<usize> for BlockDeque<T, B> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.count;
        match self.get(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, const B: usize> IndexMut<usize> for BlockDeque<T, B> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.count;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, const B: usize> Extend<T> for BlockDeque<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const B: usize> FromIterator<T> for BlockDeque<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator, front to back.
pub struct Iter<'a, T, const B: usize> {
    deque: &'a BlockDeque<T, B>,
    head: usize,
    tail: usize,
}

impl<'a, T, const B: usize> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        let item = self.deque.get(self.head);
        self.head += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.tail - self.head;
        (n, Some(n))
    }
}

impl<'a, T, const B: usize> DoubleEndedIterator for Iter<'a, T, B> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        self.deque.get(self.tail)
    }
}

impl<T, const B: usize> ExactSizeIterator for Iter<'_, T, B> {}

impl<T, const B: usize> FusedIterator for Iter<'_, T, B> {}

/// Mutable iterator, front to back.
///
/// Walks the live blocks directly; vacant slots at the edges are skipped.
pub struct IterMut<'a, T> {
    blocks: std::slice::IterMut<'a, Option<Block<T>>>,
    head: std::slice::IterMut<'a, Option<T>>,
    tail: std::slice::IterMut<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        while self.remaining > 0 {
            if let Some(slot) = self.head.next() {
                if let Some(value) = slot.as_mut() {
                    self.remaining -= 1;
                    return Some(value);
                }
                continue;
            }
            match self.blocks.next() {
                Some(block) => {
                    if let Some(block) = block.as_mut() {
                        self.head = block.slots.iter_mut();
                    }
                }
                None if self.tail.len() > 0 => self.head = std::mem::take(&mut self.tail),
                None => return None,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        while self.remaining > 0 {
            if let Some(slot) = self.tail.next_back() {
                if let Some(value) = slot.as_mut() {
                    self.remaining -= 1;
                    return Some(value);
                }
                continue;
            }
            match self.blocks.next_back() {
                Some(block) => {
                    if let Some(block) = block.as_mut() {
                        self.tail = block.slots.iter_mut();
                    }
                }
                None if self.head.len() > 0 => self.tail = std::mem::take(&mut self.head),
                None => return None,
            }
        }
        None
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; each step pops from the corresponding end.
pub struct IntoIter<T, const B: usize> {
    deque: BlockDeque<T, B>,
}

impl<T, const B: usize> Iterator for IntoIter<T, B> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, const B: usize> DoubleEndedIterator for IntoIter<T, B> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back().ok()
    }
}

impl<T, const B: usize> ExactSizeIterator for IntoIter<T, B> {}

impl<T, const B: usize> FusedIterator for IntoIter<T, B> {}

impl<T, const B: usize> IntoIterator for BlockDeque<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> IntoIter<T, B> {
        IntoIter { deque: self }
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a BlockDeque<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Iter<'a, T, B> {
        self.iter()
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a mut BlockDeque<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}


#[cfg(test)]
mod proptests;
