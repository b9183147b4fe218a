mod actor;
mod command;
mod manager;

pub use actor::TtlActor;
pub use manager::TtlQueueManager;
