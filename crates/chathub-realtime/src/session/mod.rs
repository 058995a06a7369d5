//! Connection sessions and the registry that tracks them.

pub mod handle;
pub mod registry;

pub use handle::Session;
pub use registry::SessionRegistry;
