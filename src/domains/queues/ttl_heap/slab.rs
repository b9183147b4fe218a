/// Stable storage for heap items. Ids stay valid until the item is removed, and freed ids are
/// reused before the backing vector grows.
#[derive(Debug)]
pub(super) struct Slab<T> {
    data: Vec<Option<T>>,
    free_list: Vec<usize>, // managing available indices
}

impl<T> Slab<T> {
    pub(super) fn with_capacity(cap: usize) -> Self {
        Self { data: Vec::with_capacity(cap), free_list: Vec::new() }
    }

    pub(super) fn insert(&mut self, value: T) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                self.data[idx] = Some(value);
                idx
            },
            None => {
                self.data.push(Some(value));
                self.data.len() - 1
            },
        }
    }

    pub(super) fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.data.get_mut(index)?.take()?;
        self.free_list.push(index);
        Some(value)
    }

    pub(super) fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)?.as_ref()
    }

    pub(super) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)?.as_mut()
    }

    pub(super) fn clear(&mut self) {
        self.data.clear();
        self.free_list.clear();
    }
}
