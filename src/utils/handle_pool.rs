use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

/// `HandlePool` hands out versioned handles and recycles the slots of freed
/// ones. A slot is alive while its version is odd, so the nil handle `(0, 0)`
/// is never alive.
#[derive(Debug)]
pub struct HandlePool<H: HandleLike> {
    versions: Vec<HandleIndex>,
    frees: Vec<HandleIndex>,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> Self {
        HandlePool {
            versions: Vec::new(),
            frees: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a new `HandlePool` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        HandlePool {
            versions: Vec::with_capacity(capacity),
            frees: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates a unused `Handle`.
    pub fn create(&mut self) -> H {
        if let Some(index) = self.frees.pop() {
            let version = &mut self.versions[index as usize];
            *version = version.wrapping_add(1);
            H::new(index, *version)
        } else {
            self.versions.push(1);
            H::new(self.versions.len() as HandleIndex - 1, 1)
        }
    }

    /// Returns true if this `Handle` was created by this pool, and has not been
    /// freed yet.
    #[inline]
    pub fn is_alive(&self, handle: H) -> bool {
        match self.versions.get(handle.index() as usize) {
            Some(&v) => v == handle.version() && (v & 1) == 1,
            None => false,
        }
    }

    /// Recycles the `Handle` index, and mark its version as dead.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.is_alive(handle) {
            return false;
        }

        let index = handle.index();
        self.versions[index as usize] = handle.version().wrapping_add(1);
        self.frees.push(index);
        true
    }

    /// Returns the total number of alive handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::super::handle::Handle;
    use super::*;

    #[test]
    fn recycle() {
        let mut pool = HandlePool::<Handle>::new();

        let e1 = pool.create();
        assert!(pool.is_alive(e1));
        assert!(pool.free(e1));
        assert!(!pool.is_alive(e1));
        assert!(!pool.free(e1));

        let e2 = pool.create();
        assert_eq!(e2.index(), e1.index());
        assert!(e2.version() > e1.version());
        assert!(!pool.is_alive(e1));
        assert!(pool.is_alive(e2));
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_alive(Handle::nil()));
    }
}
