// Guild-keyed configuration documents.

pub mod document;
pub mod json_store;

#[cfg(test)]
pub mod in_memory;

#[cfg(test)]
pub use in_memory::InMemoryConfigStore;
pub use json_store::JsonConfigStore;
