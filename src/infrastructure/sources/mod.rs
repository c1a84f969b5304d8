pub mod file_source;
pub mod in_memory;

pub use file_source::FileOrderSource;
pub use in_memory::InMemoryOrderSource;
