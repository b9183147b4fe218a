use crate::domains::interface::TContainer;
use crate::make_smart_pointer;
use std::collections::VecDeque;

/// First in, first out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    data: VecDeque<T>,
}

make_smart_pointer!(Queue<T>, VecDeque<T> => data);

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { data: VecDeque::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { data: VecDeque::with_capacity(cap) }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TContainer<T> for Queue<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        self.data.push_back(value);
    }

    fn pop(&mut self) -> Option<T> {
        self.data.pop_front()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
