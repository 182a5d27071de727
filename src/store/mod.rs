//! Data store collaborators.

pub mod memory;
pub mod traits;

pub use memory::{row, seed_demo_data, MemoryStore};
pub use traits::{DataStore, FilterCond};
