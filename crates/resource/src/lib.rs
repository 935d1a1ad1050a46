//! Asset providers for the refcards pipeline.
//!
//! - [`FilesystemResourceProvider`]: reads assets below a base directory
//! - [`InMemoryResourceProvider`]: re-exported from refcards-traits

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use refcards_traits::InMemoryResourceProvider;
