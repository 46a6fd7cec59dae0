use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

/// Link value marking the absence of a neighbour.
pub(crate) const NIL: usize = usize::MAX;

/// A node in the doubly linked list.
///
/// Links are slot indices into the owning list's arena, never references, so
/// a node never owns its neighbours.
struct Entry<T> {
    val: T,
    prev: usize,
    next: usize,
}

/// A doubly linked list with fixed capacity, stored in a flat arena.
///
/// Nodes live in `slots` and refer to each other by index. Slots vacated by
/// [`pop_back`](List::pop_back) go onto a free list and are reused by the next
/// [`push_front`](List::push_front), so a full list never reallocates.
///
/// The front of the list is the most recently used node, the back the least
/// recently used one.
///
/// # Examples
///
/// ```ignore
/// use core::num::NonZeroUsize;
///
/// let mut list = List::new(NonZeroUsize::new(2).unwrap());
/// let (a, _) = list.push_front(10);
/// list.push_front(20);
///
/// // List is now full: 10 is the oldest and makes room for 30
/// assert_eq!(list.push_front(30).1, Some(10));
///
/// list.move_to_front(a);
/// assert_eq!(list.pop_back().map(|(_, v)| v), Some(20));
/// ```
pub(crate) struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    /// Slot of the first (most recently used) node, or `NIL`.
    head: usize,
    /// Slot of the last (least recently used) node, or `NIL`.
    tail: usize,
    slots: Vec<Option<Entry<T>>>,
    free: Vec<usize>,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub(crate) fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            head: NIL,
            tail: NIL,
            slots: Vec::with_capacity(cap.get()),
            free: Vec::new(),
        }
    }

    /// Returns the maximum number of items the list can hold.
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Slot of the first node, if any.
    pub(crate) fn front(&self) -> Option<usize> {
        (self.head != NIL).then_some(self.head)
    }

    /// Slot of the last node, if any.
    pub(crate) fn back(&self) -> Option<usize> {
        (self.tail != NIL).then_some(self.tail)
    }

    /// Returns the value stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not occupied. Slots handed out by `push_front`
    /// stay occupied until `pop_back` returns them.
    pub(crate) fn get(&self, slot: usize) -> &T {
        &self.entry(slot).val
    }

    /// Returns the value stored in `slot` mutably.
    pub(crate) fn get_mut(&mut self, slot: usize) -> &mut T {
        &mut self.entry_mut(slot).val
    }

    /// Adds a value to the front of the list.
    ///
    /// If the list is full, the back node is removed first and its value is
    /// returned alongside the slot of the new node. Insertion never fails.
    pub(crate) fn push_front(&mut self, val: T) -> (usize, Option<T>) {
        let evicted = if self.is_full() {
            self.pop_back().map(|(_, old)| old)
        } else {
            None
        };
        let entry = Entry {
            val,
            prev: NIL,
            next: NIL,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.attach(slot);
        self.len += 1;
        (slot, evicted)
    }

    /// Removes the last (least recently used) node and returns its slot and value.
    ///
    /// The slot goes onto the free list.
    pub(crate) fn pop_back(&mut self) -> Option<(usize, T)> {
        let slot = self.back()?;
        self.detach(slot);
        let entry = self.slots[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some((slot, entry.val))
    }

    /// Moves a node to the front of the list.
    ///
    /// Moving the current front node is a no-op.
    pub(crate) fn move_to_front(&mut self, slot: usize) {
        if slot == self.head {
            return;
        }
        self.detach(slot);
        self.attach(slot);
    }

    /// Iterates from front to back, yielding each node's slot and value.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Asserts that the links, length and free list agree with each other.
    pub(crate) fn check_links(&self) {
        let mut prev = NIL;
        let mut cursor = self.head;
        let mut count = 0;
        while cursor != NIL {
            let entry = self.entry(cursor);
            assert_eq!(entry.prev, prev, "slot {cursor} has a stale prev link");
            prev = cursor;
            cursor = entry.next;
            count += 1;
            assert!(count <= self.len, "list links form a cycle");
        }
        assert_eq!(prev, self.tail, "tail does not terminate the forward walk");
        assert_eq!(count, self.len, "walked {count} nodes, len is {}", self.len);
        assert!(self.len <= self.cap.get(), "len {} exceeds cap", self.len);

        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(occupied, self.len, "occupied slots disagree with len");
        assert_eq!(
            self.free.len(),
            self.slots.len() - self.len,
            "free list does not cover every vacant slot"
        );
        for &slot in &self.free {
            assert!(self.slots[slot].is_none(), "free slot {slot} is occupied");
        }
    }

    fn entry(&self, slot: usize) -> &Entry<T> {
        match self.slots.get(slot) {
            Some(Some(entry)) => entry,
            _ => panic!("list slot {slot} is not occupied"),
        }
    }

    fn entry_mut(&mut self, slot: usize) -> &mut Entry<T> {
        match self.slots.get_mut(slot) {
            Some(Some(entry)) => entry,
            _ => panic!("list slot {slot} is not occupied"),
        }
    }

    /// Unlinks a node, leaving it occupied but with no neighbours.
    fn detach(&mut self, slot: usize) {
        let (prev, next) = {
            let entry = self.entry(slot);
            (entry.prev, entry.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.entry_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.entry_mut(next).prev = prev;
        }
        let entry = self.entry_mut(slot);
        entry.prev = NIL;
        entry.next = NIL;
    }

    /// Links a detached node in at the front.
    fn attach(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let entry = self.entry_mut(slot);
            entry.prev = NIL;
            entry.next = old_head;
        }
        if old_head == NIL {
            self.tail = slot;
        } else {
            self.entry_mut(old_head).prev = slot;
        }
        self.head = slot;
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front;
        let entry = self.list.entry(slot);
        self.front = entry.next;
        self.remaining -= 1;
        Some((slot, &entry.val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back;
        let entry = self.list.entry(slot);
        self.back = entry.prev;
        self.remaining -= 1;
        Some((slot, &entry.val))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
