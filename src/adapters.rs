//! FIFO and LIFO wrappers over [`DList`].

use crate::dlist::DList;

/// First in, first out. Pushes at the back, pops at the front.
#[derive(Clone, Debug)]
pub struct Queue<T> {
    list: DList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> Queue<T> {
    pub fn with_capacity(hint: usize) -> Self {
        Self {
            list: DList::with_capacity(hint),
        }
    }

    #[inline]
    pub fn push(&mut self, t: T) {
        self.list.append(t);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.list.remove_lo()
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.list.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn as_list(&self) -> &DList<T> {
        &self.list
    }
}

/// Last in, first out. Pushes and pops at the back.
#[derive(Clone, Debug)]
pub struct Stack<T> {
    list: DList<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> Stack<T> {
    pub fn with_capacity(hint: usize) -> Self {
        Self {
            list: DList::with_capacity(hint),
        }
    }

    #[inline]
    pub fn push(&mut self, t: T) {
        self.list.append(t);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.list.remove_hi()
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.list.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn as_list(&self) -> &DList<T> {
        &self.list
    }
}
