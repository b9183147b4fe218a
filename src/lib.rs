//! In-memory containers: a FIFO [`Queue`], a LIFO [`Stack`], a [`RandomStack`] and the
//! expiration-ordered [`TtlHeap`], plus a [`TtlActor`] that owns a heap and sweeps it on a timer.
pub mod config;
pub mod domains;
pub mod macros;
mod types;

pub use domains::queues::{Queue, TtlHeap};
pub use domains::stacks::{RandomStack, Stack};
pub use domains::ttl_actors::{TtlActor, TtlQueueManager};

pub mod prelude {
    pub use crate::config::SweeperConfig;
    pub use crate::domains::ActorError;
    pub use crate::domains::clock::{ManualClock, SystemClock, TClock};
    pub use crate::domains::interface::TContainer;
    pub use crate::{Queue, RandomStack, Stack, TtlActor, TtlHeap, TtlQueueManager};
    pub use chrono;
}
