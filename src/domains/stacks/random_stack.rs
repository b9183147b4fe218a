use crate::domains::interface::TContainer;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Stack whose `pop` hands back a uniformly chosen element.
///
/// Order is not kept, so removal fills the hole with the last element and stays O(1).
#[derive(Debug, Clone)]
pub struct RandomStack<T, R = ThreadRng> {
    data: Vec<T>,
    rng: R,
}

impl<T> RandomStack<T, ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl<T> Default for RandomStack<T, ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R: Rng> RandomStack<T, R> {
    pub fn with_rng(rng: R) -> Self {
        Self { data: Vec::new(), rng }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T, R: Rng> TContainer<T> for RandomStack<T, R> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        self.data.push(value);
    }

    fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.data.len());
        Some(self.data.swap_remove(idx))
    }
}

impl<T> FromIterator<T> for RandomStack<T, ThreadRng> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T, R> Extend<T> for RandomStack<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
