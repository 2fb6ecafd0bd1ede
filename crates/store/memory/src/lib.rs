mod store;

pub use store::MemoryTryOnStore;
