pub mod encoder;
pub mod resource;

pub use encoder::{CodeEncoder, EncodeError};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
