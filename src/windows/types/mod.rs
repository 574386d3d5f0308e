//! Windows-specific type wrappers

mod handle;

pub use handle::Handle;
