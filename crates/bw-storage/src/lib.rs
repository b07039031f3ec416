//! Filesystem capability for Bookwatch.
//!
//! This crate provides a [`Storage`] trait for abstracting the few filesystem
//! operations the subnav resolver and its writers need. This enables:
//!
//! - **Unit testing** of link resolution without touching the real filesystem
//! - **Parallel resolution** of independent products against shared, read-only state
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `exists()`, `read()`, `find_extension_agnostic()` and `overwrite()`
//! - [`FsStorage`] implementation for the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//! - [`logical_stem`] / [`matches_logical_stem`], the extension-agnostic matching rule
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bw_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! for path in storage.find_extension_agnostic(Path::new("my/index"), Path::new("source")) {
//!     println!("{}", path.display());
//! }
//! ```

mod fs;
mod logical;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
pub use logical::{logical_stem, matches_logical_stem};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
