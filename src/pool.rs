//! Fixed-capacity object pool with a bitmap allocator.
//!
//! Bit `i` of the bitmap is set iff slot `i` holds a live object.  The
//! bitmap is the single source of truth: `allocate` and `release` flip the
//! bit and the slot's `alive` flag together, so the two never disagree.

use crate::entities::{GameObject, Link, ObjectId};
use crate::error::{GameError, Result};

/// Default pool size.
pub const MAXOBJS: usize = 500;

type Block = u64;
const BLOCK_BITS: usize = Block::BITS as usize;

fn blocks_for(capacity: usize) -> usize {
    (capacity + BLOCK_BITS - 1) / BLOCK_BITS
}

pub struct ObjectPool {
    slots: Vec<GameObject>,
    bitmap: Vec<Block>,
    /// Highest index ever handed out.  Never shrinks.
    watermark: Option<usize>,
    live: usize,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::with_capacity(MAXOBJS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut bitmap = vec![0; blocks_for(capacity)];

        // Bits past `capacity` in the last block are permanently taken so
        // the scan can never hand them out.
        let tail = capacity % BLOCK_BITS;
        if tail != 0 {
            if let Some(last) = bitmap.last_mut() {
                *last = !0 << tail;
            }
        }

        ObjectPool {
            slots: (0..capacity).map(GameObject::vacant).collect(),
            bitmap,
            watermark: None,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn watermark(&self) -> Option<usize> {
        self.watermark
    }

    pub fn is_allocated(&self, index: usize) -> bool {
        index < self.capacity() && self.bitmap[index / BLOCK_BITS] & (1 << (index % BLOCK_BITS)) != 0
    }

    /// Claim the lowest free slot.
    ///
    /// Full blocks are skipped a word at a time; within the first block
    /// with room, the lowest clear bit wins.
    pub fn allocate(&mut self) -> Result<usize> {
        let Some(block) = self.bitmap.iter().position(|&b| b != Block::MAX) else {
            return Err(GameError::PoolExhausted {
                capacity: self.capacity(),
            });
        };
        let bit = self.bitmap[block].trailing_ones() as usize;
        self.bitmap[block] |= 1 << bit;

        let index = block * BLOCK_BITS + bit;
        if self.watermark.map_or(true, |w| index > w) {
            self.watermark = Some(index);
        }
        self.live += 1;

        let slot = &mut self.slots[index];
        if !slot.link.is_clear() {
            tracing::warn!(
                index,
                link = ?slot.link,
                "reallocated slot still carries target list linkage"
            );
            slot.link = Link::default();
        }
        slot.alive = true;
        slot.generation = slot.generation.wrapping_add(1);

        tracing::trace!(index, generation = slot.generation, "allocated slot");
        Ok(index)
    }

    /// Return a slot to the free pool.  Returns false if it was not allocated.
    ///
    /// Callers must unlink the object from the target list first.
    pub fn release(&mut self, index: usize) -> bool {
        if !self.is_allocated(index) {
            return false;
        }
        self.bitmap[index / BLOCK_BITS] &= !(1 << (index % BLOCK_BITS));
        self.slots[index].alive = false;
        self.live -= 1;
        tracing::trace!(index, "released slot");
        true
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.slots
            .get(id.index)
            .filter(|o| o.alive && o.generation == id.generation)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.slots
            .get_mut(id.index)
            .filter(|o| o.alive && o.generation == id.generation)
    }

    /// Raw slot access, live or not.
    pub fn slot(&self, index: usize) -> &GameObject {
        &self.slots[index]
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut GameObject {
        &mut self.slots[index]
    }

    /// Slot indices worth visiting: everything up to the watermark.
    pub fn scan_range(&self) -> std::ops::Range<usize> {
        0..self.watermark.map_or(0, |w| w + 1)
    }

    /// Live objects in ascending slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = &GameObject> {
        self.slots[self.scan_range()].iter().filter(|o| o.alive)
    }
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self::new()
    }
}
