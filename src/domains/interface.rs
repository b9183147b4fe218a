/// Push/pop collection whose only ordering contract is the one its `pop` documents.
pub trait TContainer<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, value: T);

    /// `None` when empty.
    fn pop(&mut self) -> Option<T>;
}
