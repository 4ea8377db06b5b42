//! Intrusive doubly linked list of targetable objects.
//!
//! Links are slot indices stored in each object's `Link`, so insert and
//! remove are O(1) with no allocation.  An object is on the list iff its
//! `on_list` flag is set.

use crate::pool::ObjectPool;

#[derive(Debug, Default)]
pub struct TargetList {
    head: Option<usize>,
    len: usize,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Push `index` onto the head of the list.
    ///
    /// Inserting an object that is already linked is a bug: it panics in
    /// debug builds and is ignored in release builds.
    pub fn insert(&mut self, pool: &mut ObjectPool, index: usize) {
        let already = pool.slot(index).link.on_list;
        debug_assert!(!already, "object {index} inserted into target list twice");
        if already {
            tracing::warn!(index, "ignoring duplicate target list insert");
            return;
        }

        if let Some(old) = self.head {
            pool.slot_mut(old).link.prev = Some(index);
        }
        let link = &mut pool.slot_mut(index).link;
        link.next = self.head;
        link.prev = None;
        link.on_list = true;

        self.head = Some(index);
        self.len += 1;
        self.debug_check(pool, index);
    }

    /// Unlink `index`, returning the slot that followed it.
    ///
    /// Removing an object that is not on the list does nothing and
    /// returns `None`.
    pub fn remove(&mut self, pool: &mut ObjectPool, index: usize) -> Option<usize> {
        let link = pool.slot(index).link;
        if !link.on_list {
            tracing::trace!(index, "remove of unlinked object ignored");
            return None;
        }

        match link.prev {
            Some(prev) => pool.slot_mut(prev).link.next = link.next,
            None => self.head = link.next,
        }
        if let Some(next) = link.next {
            pool.slot_mut(next).link.prev = link.prev;
        }

        pool.slot_mut(index).link = Default::default();
        self.len -= 1;
        debug_assert!(
            !self.contains_by_scan(pool, index),
            "object {index} still reachable after removal"
        );
        link.next
    }

    /// Slot indices from head to tail.
    pub fn iter<'a>(&self, pool: &'a ObjectPool) -> Iter<'a> {
        Iter {
            pool,
            cursor: self.head,
        }
    }

    /// Walk the list looking for `index`.  O(n); for consistency checks.
    pub fn contains_by_scan(&self, pool: &ObjectPool, index: usize) -> bool {
        self.iter(pool).any(|i| i == index)
    }

    fn debug_check(&self, pool: &ObjectPool, index: usize) {
        if cfg!(debug_assertions) {
            assert_eq!(
                self.contains_by_scan(pool, index),
                pool.slot(index).link.on_list,
                "target list membership disagrees with flag for {index}"
            );
        }
    }
}

pub struct Iter<'a> {
    pool: &'a ObjectPool,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.cursor?;
        self.cursor = self.pool.slot(index).link.next;
        Some(index)
    }
}
