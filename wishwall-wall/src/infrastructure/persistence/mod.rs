pub mod memory;

pub use memory::MemoryMessageStore;
