//! Filesystem operations for prestart.
//!
//! Atomic replacement for the compiled configuration artifact, and the
//! recursive permission normalization run over the writable storage tree.

mod atomic;
mod chmod;

pub use atomic::atomic_write_file;
pub use chmod::chmod_recursive;
