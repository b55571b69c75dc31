// Implementations for the leveling system.

#[cfg(test)]
pub mod in_memory;
pub mod json_store;

// Re-export for convenience
#[cfg(test)]
pub use in_memory::InMemoryLevelStore;
pub use json_store::JsonLevelStore;
