//! Error types for thumbnail generation.
//!
//! Everything that can fail here traces back to the vendor image encoder,
//! a closed-source shared library that may be absent from the plugin
//! directory or blocked by the operating system.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for thumbnail operations.
///
/// Encoding for the base model is pure Rust and infallible; these errors
/// only come up on the Pro/Plus/Max path, which compresses through the
/// vendor library.
#[derive(Error, Debug)]
pub enum Error {
    /// The vendor encoder library is not installed.
    ///
    /// Elegoo does not allow the library to be redistributed, so the user
    /// has to copy it out of an Elegoo Cura installation themselves. The
    /// settings panel shows the steps when this comes up.
    #[error("encoder library not found at {}", .0.display())]
    LibraryNotFound(PathBuf),

    /// The library exists but macOS still has it under quarantine.
    ///
    /// Gatekeeper refuses to load a downloaded library until the user has
    /// opened it once by hand; loading would fail with an opaque error, so
    /// this is caught up front.
    #[error("encoder library is quarantined: {}", .0.display())]
    LibraryQuarantined(PathBuf),

    /// Loading the library or resolving its entry point failed.
    #[error(transparent)]
    Library(#[from] libloading::Error),
}
