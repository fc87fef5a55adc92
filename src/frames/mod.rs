//! Run-length encoded frame sequence: codec, store, background loader.

mod codec;
mod store;

// Re-export public types
pub use codec::{EncodedFrame, Grid};
pub use store::{spawn_loader_thread, FrameStore};
