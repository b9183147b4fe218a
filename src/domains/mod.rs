pub mod clock;
pub mod error;
pub mod interface;
pub mod queues;
pub mod stacks;
pub mod ttl_actors;

pub use error::ActorError;
