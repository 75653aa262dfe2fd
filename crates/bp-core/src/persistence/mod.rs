mod memory;
mod port;

pub use memory::InMemoryBlueprintPersistence;
pub use port::BlueprintPersistence;
