//! Preference persistence — injected store abstraction plus the
//! default in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::PreferenceStore;
