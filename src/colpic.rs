//! Locating and calling the vendor `ColPic` encoder.
//!
//! Elegoo ships the Pro/Plus/Max compression as a closed shared library
//! inside their own Cura builds. It cannot be redistributed, so it is
//! loaded from a configurable directory at call time, and its absence is a
//! condition to report rather than a bug.

use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use std::process::Command;

use libloading::{Library, Symbol};
use log::debug;

use crate::error::Error;

/// Color table size handed to the vendor encoder.
const MAX_COLORS: c_int = 1024;

// int ColPic_EncodeStr(U16* fromcolor16, int picw, int pich,
//                      U8* outputdata, int outputmaxtsize, int colorsmax);
type ColPicEncodeStr = unsafe extern "C" fn(
    fromcolor16: *const u16,
    picw: c_int,
    pich: c_int,
    outputdata: *mut u8,
    outputmaxtsize: c_int,
    colorsmax: c_int,
) -> c_int;

/// Availability of the vendor library on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryStatus {
    Ready,
    /// Not installed; the user has to copy it out of an Elegoo Cura build.
    Missing(PathBuf),
    /// Present, but macOS refuses to load it until approved once.
    Quarantined(PathBuf),
}

/// Vendor library file name for the current operating system.
pub fn library_filename() -> &'static str {
    if cfg!(target_os = "macos") {
        "libColPic.dylib"
    } else if cfg!(target_os = "linux") {
        "libColPic.so"
    } else {
        "ColPic_X64.dll"
    }
}

/// Full path of the vendor library inside `dir`.
pub fn library_path(dir: &Path) -> PathBuf {
    dir.join(library_filename())
}

/// Probe whether the library at `path` could be loaded right now.
pub fn library_status(path: &Path) -> LibraryStatus {
    if !path.is_file() {
        LibraryStatus::Missing(path.to_path_buf())
    } else if is_quarantined(path) {
        LibraryStatus::Quarantined(path.to_path_buf())
    } else {
        LibraryStatus::Ready
    }
}

/// True when macOS still holds the file under quarantine.
///
/// A downloaded file carries the `com.apple.quarantine` attribute until the
/// user right-clicks and opens it once; `com.apple.lastuseddate` showing up
/// next to it records exactly that approval. Everywhere but macOS this is
/// `false` without probing.
pub fn is_quarantined(path: &Path) -> bool {
    if !cfg!(target_os = "macos") || !path.is_file() {
        return false;
    }
    match Command::new("xattr").arg(path).output() {
        Ok(output) => {
            let attrs = String::from_utf8_lossy(&output.stdout);
            debug!("attributes of {}: {}", path.display(), attrs.trim());
            quarantine_flagged(&attrs)
        }
        Err(err) => {
            debug!("xattr probe failed for {}: {}", path.display(), err);
            false
        }
    }
}

fn quarantine_flagged(attrs: &str) -> bool {
    attrs.contains("com.apple.quarantine") && !attrs.contains("com.apple.lastuseddate")
}

/// Run the vendor compression over RGB565 `samples` of a `width` x `height`
/// image.
///
/// `samples` holds the pixels in row-major order. The output buffer is
/// sized to one byte per pixel, which is the capacity the vendor call
/// expects; it NUL fills whatever it does not use. The library is loaded
/// fresh on every call and dropped again on return, so a file swapped in
/// while the host is running gets picked up without a restart.
pub fn encode(lib_path: &Path, samples: &[u16], width: u32, height: u32) -> Result<Vec<u8>, Error> {
    match library_status(lib_path) {
        LibraryStatus::Ready => {}
        LibraryStatus::Missing(path) => return Err(Error::LibraryNotFound(path)),
        LibraryStatus::Quarantined(path) => return Err(Error::LibraryQuarantined(path)),
    }

    let capacity = width as usize * height as usize;
    debug_assert_eq!(samples.len(), capacity);
    let mut output = vec![0u8; capacity];

    unsafe {
        let library = Library::new(lib_path)?;
        let encode_str: Symbol<ColPicEncodeStr> = library.get(b"ColPic_EncodeStr")?;
        // the entry point takes height before width
        let ret = encode_str(
            samples.as_ptr(),
            height as c_int,
            width as c_int,
            output.as_mut_ptr(),
            capacity as c_int,
            MAX_COLORS,
        );
        debug!("ColPic_EncodeStr returned {}", ret);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_matches_the_platform() {
        let name = library_filename();
        if cfg!(target_os = "macos") {
            assert_eq!(name, "libColPic.dylib");
        } else if cfg!(target_os = "linux") {
            assert_eq!(name, "libColPic.so");
        } else {
            assert_eq!(name, "ColPic_X64.dll");
        }
    }

    #[test]
    fn library_path_joins_the_platform_name() {
        let path = library_path(Path::new("lib"));
        assert_eq!(path, Path::new("lib").join(library_filename()));
    }

    #[test]
    fn status_reports_missing_files() {
        let path = Path::new("does-not-exist").join(library_filename());
        assert_eq!(library_status(&path), LibraryStatus::Missing(path));
    }

    #[test]
    fn quarantine_needs_the_flag_without_an_approval() {
        assert!(quarantine_flagged(
            "com.apple.quarantine: 0083;63a1478a;Safari;"
        ));
        assert!(!quarantine_flagged(
            "com.apple.lastuseddate#PS:\ncom.apple.quarantine: 0083;63a1478a;Safari;"
        ));
        assert!(!quarantine_flagged("com.apple.FinderInfo"));
        assert!(!quarantine_flagged(""));
    }

    #[test]
    fn encode_fails_cleanly_when_the_library_is_missing() {
        let path = Path::new("does-not-exist").join(library_filename());
        let err = encode(&path, &[0u16; 4], 2, 2).unwrap_err();
        assert!(matches!(err, Error::LibraryNotFound(_)));
    }
}
