pub mod fifo;
pub mod ttl_heap;

pub use fifo::Queue;
pub use ttl_heap::TtlHeap;
