use indexmap::IndexSet;
use std::hash::{BuildHasher, Hasher};

/// A hasher that only knows how to hash data of type `usize`, simply returning
/// it as `u64` for speed.
struct AddrHasher {
    hash: usize,
}

impl Hasher for AddrHasher {
    fn write(&mut self, _bytes: &[u8]) {
        panic!("Bytes aren't expected to be hashed.");
    }

    fn write_usize(&mut self, i: usize) {
        self.hash = i;
    }

    fn finish(&self) -> u64 {
        self.hash as u64
    }
}

#[derive(Clone, Default)]
struct BuildAddrHasher;

impl BuildHasher for BuildAddrHasher {
    type Hasher = AddrHasher;

    fn build_hasher(&self) -> Self::Hasher {
        AddrHasher { hash: 0 }
    }
}

/// Slot arena backing the node pool. Released addresses are remembered and
/// handed out again before the arena grows.
#[derive(Clone, Default)]
pub(super) struct Mem<T> {
    data: Vec<T>,
    released: IndexSet<usize, BuildAddrHasher>,
}

impl<T> Mem<T> {
    pub(super) fn raw(data: Vec<T>) -> Self {
        Self {
            data,
            released: IndexSet::with_hasher(BuildAddrHasher),
        }
    }

    pub(super) fn intern(&mut self, t: T) -> usize {
        if let Some(addr) = self.released.pop() {
            self.data[addr] = t;
            addr
        } else {
            let addr = self.data.len();
            self.data.push(t);
            addr
        }
    }

    #[inline]
    pub(super) fn get(&self, addr: usize) -> &T {
        &self.data[addr]
    }

    #[inline]
    pub(super) fn get_mut(&mut self, addr: usize) -> &mut T {
        &mut self.data[addr]
    }

    pub(super) fn free(&mut self, addr: usize) {
        assert!(addr < self.data.len(), "Address {addr} was never interned.");
        self.released.insert(addr);
    }

    #[inline]
    pub(super) fn is_live(&self, addr: &usize) -> bool {
        *addr < self.data.len() && !self.released.contains(addr)
    }

    /// Number of released slots still held by the arena.
    #[inline]
    pub(super) fn holes(&self) -> usize {
        self.released.len()
    }

    /// Every slot in address order, released ones included.
    pub(super) fn slots_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Drops released slots sitting at the end of the arena and returns their
    /// memory. Returns how many slots were dropped.
    pub(super) fn shrink(&mut self) -> usize {
        let mut dropped = 0;
        while let Some(last) = self.data.len().checked_sub(1) {
            if !self.released.swap_remove(&last) {
                break;
            }
            self.data.pop();
            dropped += 1;
        }
        self.data.shrink_to_fit();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::Mem;

    #[test]
    fn test_intern_reuses_released() {
        let mut mem = Mem::raw(Vec::new());
        let a = mem.intern('a');
        let b = mem.intern('b');
        mem.free(a);
        assert!(!mem.is_live(&a));
        assert!(mem.is_live(&b));

        let c = mem.intern('c');
        assert_eq!(c, a);
        assert_eq!(*mem.get(c), 'c');
        assert_eq!(mem.holes(), 0);
    }

    #[test]
    fn test_shrink_drops_trailing_holes() {
        let mut mem = Mem::raw(vec!['a', 'b', 'c', 'd']);
        mem.free(1);
        mem.free(3);
        mem.free(2);
        assert_eq!(mem.shrink(), 3);
        assert_eq!(mem.holes(), 0);
        assert!(mem.is_live(&0));
        assert!(!mem.is_live(&1));
        assert_eq!(mem.intern('e'), 1);
    }

    #[test]
    fn test_shrink_keeps_inner_holes() {
        let mut mem = Mem::raw(vec!['a', 'b', 'c']);
        mem.free(0);
        assert_eq!(mem.shrink(), 0);
        assert_eq!(mem.holes(), 1);
        *mem.get_mut(2) = 'z';
        assert_eq!(*mem.get(2), 'z');
    }

    #[test]
    #[should_panic]
    fn test_free_unknown_addr() {
        let mut mem = Mem::raw(vec!['a']);
        mem.free(4);
    }
}
