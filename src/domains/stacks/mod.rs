pub mod random_stack;
pub mod stack;

pub use random_stack::RandomStack;
pub use stack::Stack;
