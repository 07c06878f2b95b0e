//! A doubly-linked list over a pool of reusable nodes.
//!
//! `front` and `tail` bound every node the list has ever allocated, while
//! `list_start` and `list_end` bound the nodes currently holding elements.
//! Nodes outside the window are spare: end-insertions extend the window over
//! them before anything is allocated, and removals hand their node back to
//! the spare set instead of freeing it.
//!
//! ```text
//! NIL <- [ ] <-> [a] <-> [b] <-> [c] <-> [ ] -> NIL
//!         ^       ^               ^       ^
//!       front list_start      list_end   tail
//! ```

mod dump;
mod iter;
mod mem;

pub use dump::{Role, Slot};
pub use iter::{IntoIter, Iter, IterMut};

use log::trace;

use mem::Mem;

/// Address terminating the pool chain on both ends.
const NIL: usize = usize::MAX;

#[derive(Clone)]
struct Node<T> {
    data: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn spare() -> Self {
        Self {
            data: None,
            prev: NIL,
            next: NIL,
        }
    }
}

/// Links of the `i`-th node in a freshly built chain of `n` nodes.
#[inline]
fn chain_links(i: usize, n: usize) -> (usize, usize) {
    let prev = if i == 0 { NIL } else { i - 1 };
    let next = if i + 1 == n { NIL } else { i + 1 };
    (prev, next)
}

#[derive(Clone)]
pub struct DList<T> {
    mem: Mem<Node<T>>,
    front: usize,
    tail: usize,
    list_start: usize,
    list_end: usize,
    capacity: usize,
    len: usize,
}

impl<T> DList<T> {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with `hint` pooled nodes (at least one). The
    /// window starts anchored at the first node of the pool.
    pub fn with_capacity(hint: usize) -> Self {
        assert!(
            hint < isize::MAX as usize,
            "Capacity hint {hint} is not a representable pool size."
        );
        let capacity = hint.max(1);
        let nodes = (0..capacity)
            .map(|i| {
                let (prev, next) = chain_links(i, capacity);
                Node {
                    data: None,
                    prev,
                    next,
                }
            })
            .collect();
        Self {
            mem: Mem::raw(nodes),
            front: 0,
            tail: capacity - 1,
            list_start: 0,
            list_end: 0,
            capacity,
            len: 0,
        }
    }

    pub fn from_slice(slice: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_vec(slice.to_vec())
    }

    /// Builds a list whose pool holds exactly the given elements.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        if len == 0 {
            return Self::new();
        }
        let nodes = vec
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let (prev, next) = chain_links(i, len);
                Node {
                    data: Some(t),
                    prev,
                    next,
                }
            })
            .collect();
        Self {
            mem: Mem::raw(nodes),
            front: 0,
            tail: len - 1,
            list_start: 0,
            list_end: len - 1,
            capacity: len,
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of pooled nodes, live or spare.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pooled nodes not covered by the window. The empty anchor of
    /// an empty list is not counted.
    #[inline]
    pub fn spare(&self) -> usize {
        self.capacity - self.len.max(1)
    }

    fn assert_index(&self, index: usize) {
        assert!(
            index < self.len,
            "Index {index} out of bounds for list of length {}.",
            self.len
        );
    }

    #[inline]
    fn data(&self, node_addr: usize) -> &T {
        self.mem
            .get(node_addr)
            .data
            .as_ref()
            .expect("Window node doesn't contain data.")
    }

    #[inline]
    fn data_mut(&mut self, node_addr: usize) -> &mut T {
        self.mem
            .get_mut(node_addr)
            .data
            .as_mut()
            .expect("Window node doesn't contain data.")
    }

    #[inline]
    fn next(&self, node_addr: usize) -> usize {
        self.mem.get(node_addr).next
    }

    #[inline]
    fn prev(&self, node_addr: usize) -> usize {
        self.mem.get(node_addr).prev
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, including on an empty list.
    #[inline]
    pub fn get(&self, index: usize) -> &T {
        self.assert_index(index);
        self.data(self.search(index))
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.assert_index(index);
        let node_addr = self.search(index);
        self.data_mut(node_addr)
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.data(self.list_start))
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(self.data(self.list_end))
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        Some(self.data_mut(self.list_start))
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        Some(self.data_mut(self.list_end))
    }

    /// Overwrites the element at `index` and returns the previous one. Setting
    /// `index == len` appends instead and returns `None`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn set(&mut self, index: usize, t: T) -> Option<T> {
        assert!(
            index <= self.len,
            "Index {index} out of bounds for setting into list of length {}.",
            self.len
        );
        if index == self.len {
            self.append(t);
            return None;
        }
        let node_addr = self.search(index);
        self.mem.get_mut(node_addr).data.replace(t)
    }

    pub fn append(&mut self, t: T) {
        if !self.is_empty() {
            self.list_end = match self.next(self.list_end) {
                NIL if self.len < self.capacity => self.rotate_front_to_tail(),
                NIL => self.grow_tail(),
                next => next,
            };
        }
        self.mem.get_mut(self.list_end).data = Some(t);
        self.len += 1;
    }

    pub fn prepend(&mut self, t: T) {
        if !self.is_empty() {
            self.list_start = match self.prev(self.list_start) {
                NIL if self.len < self.capacity => self.rotate_tail_to_front(),
                NIL => self.grow_front(),
                prev => prev,
            };
        }
        self.mem.get_mut(self.list_start).data = Some(t);
        self.len += 1;
    }

    /// Removes the last element. Its node stays pooled as spare capacity.
    pub fn remove_hi(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let node_addr = self.list_end;
        let t = self.mem.get_mut(node_addr).data.take();
        if self.len > 1 {
            self.list_end = self.prev(node_addr);
        }
        self.len -= 1;
        t
    }

    /// Removes the first element. Its node stays pooled as spare capacity.
    pub fn remove_lo(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let node_addr = self.list_start;
        let t = self.mem.get_mut(node_addr).data.take();
        if self.len > 1 {
            self.list_start = self.next(node_addr);
        }
        self.len -= 1;
        t
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.remove_hi()
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_lo()
    }

    /// Removes and returns the element at `index`. The vacated node is moved
    /// right past `list_end`, so the pool keeps its size.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.assert_index(index);
        let t = if index == 0 {
            self.remove_lo()
        } else if index == self.len - 1 {
            self.remove_hi()
        } else {
            let node_addr = self.split_search(index);
            self.unlink(node_addr);
            self.link_after(self.list_end, node_addr);
            self.len -= 1;
            self.mem.get_mut(node_addr).data.take()
        };
        t.expect("Window node doesn't contain data.")
    }

    /// Drops every element, keeping the pool.
    pub fn clear(&mut self) {
        while self.remove_hi().is_some() {}
    }

    /// Frees spare nodes until at most `keep` remain. Nodes past `list_end`
    /// go first.
    pub fn truncate_spare(&mut self, keep: usize) {
        let mut released = 0;
        while self.spare() > keep {
            let node_addr = if self.tail != self.list_end {
                self.tail
            } else {
                self.front
            };
            self.release_node(node_addr);
            released += 1;
        }
        if released > 0 {
            trace!(
                "Released {released} spare nodes, pool is down to {}.",
                self.capacity
            );
        }
    }

    /// Shrinks the pool to the window (or the empty anchor) and returns the
    /// freed slots to the allocator.
    pub fn shrink_to_fit(&mut self) {
        self.truncate_spare(0);
        let dropped = self.mem.shrink();
        if dropped > 0 {
            trace!("Returned {dropped} arena slots to the allocator.");
        }
        if self.mem.holes() > 0 {
            // Live nodes sit past released slots, so they're relocated.
            *self = std::mem::take(self).into_iter().collect();
        }
    }

    /// Returns the address of the node at `index`, walking from whichever
    /// window end is nearer.
    fn search(&self, index: usize) -> usize {
        debug_assert!(index < self.len);
        if index == 0 {
            return self.list_start;
        }
        if index == self.len - 1 {
            return self.list_end;
        }
        self.split_search(index)
    }

    fn split_search(&self, index: usize) -> usize {
        if index < self.len / 2 {
            (0..index).fold(self.list_start, |node_addr, _| self.next(node_addr))
        } else {
            (index + 1..self.len).fold(self.list_end, |node_addr, _| self.prev(node_addr))
        }
    }

    /// Detaches a node from the chain, moving `front`/`tail` if it was one of
    /// them. The node's own links are left stale.
    fn unlink(&mut self, node_addr: usize) {
        let (prev, next) = (self.prev(node_addr), self.next(node_addr));
        if prev == NIL {
            self.front = next;
        } else {
            self.mem.get_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.mem.get_mut(next).prev = prev;
        }
    }

    fn link_after(&mut self, ref_node_addr: usize, node_addr: usize) {
        let next = self.next(ref_node_addr);
        let node = self.mem.get_mut(node_addr);
        node.prev = ref_node_addr;
        node.next = next;
        self.mem.get_mut(ref_node_addr).next = node_addr;
        if next == NIL {
            self.tail = node_addr;
        } else {
            self.mem.get_mut(next).prev = node_addr;
        }
    }

    fn link_before(&mut self, ref_node_addr: usize, node_addr: usize) {
        let prev = self.prev(ref_node_addr);
        let node = self.mem.get_mut(node_addr);
        node.prev = prev;
        node.next = ref_node_addr;
        self.mem.get_mut(ref_node_addr).prev = node_addr;
        if prev == NIL {
            self.front = node_addr;
        } else {
            self.mem.get_mut(prev).next = node_addr;
        }
    }

    /// Moves the spare node at `front` behind `tail`. Only valid while
    /// `list_start != front`.
    fn rotate_front_to_tail(&mut self) -> usize {
        let node_addr = self.front;
        debug_assert_ne!(node_addr, self.list_start);
        self.unlink(node_addr);
        self.link_after(self.tail, node_addr);
        trace!("Rotated spare node {node_addr} from front to tail.");
        node_addr
    }

    /// Moves the spare node at `tail` before `front`. Only valid while
    /// `list_end != tail`.
    fn rotate_tail_to_front(&mut self) -> usize {
        let node_addr = self.tail;
        debug_assert_ne!(node_addr, self.list_end);
        self.unlink(node_addr);
        self.link_before(self.front, node_addr);
        trace!("Rotated spare node {node_addr} from tail to front.");
        node_addr
    }

    fn grow_tail(&mut self) -> usize {
        let node_addr = self.mem.intern(Node::spare());
        self.link_after(self.tail, node_addr);
        self.capacity += 1;
        trace!("Pool grew at the tail to {} nodes.", self.capacity);
        node_addr
    }

    fn grow_front(&mut self) -> usize {
        let node_addr = self.mem.intern(Node::spare());
        self.link_before(self.front, node_addr);
        self.capacity += 1;
        trace!("Pool grew at the front to {} nodes.", self.capacity);
        node_addr
    }

    /// Frees a spare node from the pool and hands its slot back to the arena.
    fn release_node(&mut self, node_addr: usize) {
        assert!(self.capacity > 1, "Cannot release the last pooled node.");
        assert!(
            node_addr != self.list_start && node_addr != self.list_end,
            "Cannot release a window node."
        );
        debug_assert!(self.mem.is_live(&node_addr));
        self.unlink(node_addr);
        let node = self.mem.get_mut(node_addr);
        node.data = None;
        node.prev = NIL;
        node.next = NIL;
        self.mem.free(node_addr);
        self.capacity -= 1;
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Mutable iteration over the window, front to back.
    ///
    /// Unlike [`DList::iter`], this costs O(capacity) up front and allocates
    /// one slot table per call, spare nodes included.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn collect_n(&self, n: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().take(n).cloned().collect()
    }
}

impl<T> Default for DList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for DList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|t| self.append(t));
    }
}

impl<T> FromIterator<T> for DList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for DList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DList<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for DList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
