//! Iconify preload generator.
//!
//! Scans a front-end source tree for `prefix:name` icon references, extracts
//! the referenced icons from installed icon-set data, and emits a module that
//! registers those subsets once at startup.

pub mod config;
pub mod emit;
pub mod errors;
pub mod format;
pub mod iconset;
pub mod logging;
pub mod pipeline;
pub mod scan;
pub mod subset;
pub mod ui;

pub use errors::PreloadError;
