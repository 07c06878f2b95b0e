use std::iter::FusedIterator;

use super::{DList, Node, NIL};

/// Borrowing iterator over the window, front to back.
pub struct Iter<'a, T> {
    list: &'a DList<T>,
    head: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a DList<T>) -> Self {
        Self {
            list,
            head: list.list_start,
            back: list.list_end,
            remaining: list.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_addr = self.head;
        self.head = self.list.next(node_addr);
        self.remaining -= 1;
        Some(self.list.data(node_addr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_addr = self.back;
        self.back = self.list.prev(node_addr);
        self.remaining -= 1;
        Some(self.list.data(node_addr))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Mutable iterator over the window, front to back.
///
/// Hands out each node at most once by lending every arena slot up front and
/// taking them out in chain order. Building it is O(capacity) and allocates a
/// table of `capacity` entries, so prefer `iter` when mutation isn't needed.
pub struct IterMut<'a, T> {
    slots: Vec<Option<&'a mut Node<T>>>,
    head: usize,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(list: &'a mut DList<T>) -> Self {
        let head = list.list_start;
        let remaining = list.len;
        Self {
            slots: list.mem.slots_mut().map(Some).collect(),
            head,
            remaining,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.head == NIL {
            return None;
        }
        let node = self.slots.get_mut(self.head)?.take()?;
        self.head = node.next;
        self.remaining -= 1;
        node.data.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// Owning iterator draining the list from both ends.
pub struct IntoIter<T> {
    list: DList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_lo()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_hi()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for DList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
