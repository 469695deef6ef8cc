//! LIFO adapter over [`BlockDeque`].
//!
//! All operations act on the back of the deque.

use crate::{BlockDeque, Result, DEFAULT_BLOCK_SIZE};

#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T, const B: usize = DEFAULT_BLOCK_SIZE> {
    inner: BlockDeque<T, B>,
}

impl<T, const B: usize> Stack<T, B> {
    pub fn new() -> Self {
        Self {
            inner: BlockDeque::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.inner.push_back(value);
    }

    pub fn try_push(&mut self, value: T) -> Result<()> {
        self.inner.try_push_back(value)
    }

    /// Remove and return the most recently pushed value.
    pub fn pop(&mut self) -> Result<T> {
        self.inner.pop_back()
    }

    pub fn top(&self) -> Result<&T> {
        self.inner.back()
    }

    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.inner.back_mut()
    }

    pub fn into_inner(self) -> BlockDeque<T, B> {
        self.inner
    }
}

impl<T, const B: usize> Default for Stack<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const B: usize> From<BlockDeque<T, B>> for Stack<T, B> {
    /// The back of `deque` becomes the top of the stack.
    fn from(deque: BlockDeque<T, B>) -> Self {
        Self { inner: deque }
    }
}

impl<T: std::fmt::Debug, const B: usize> std::fmt::Debug for Stack<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}

impl<T, const B: usize> Extend<T> for Stack<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<T, const B: usize> FromIterator<T> for Stack<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
