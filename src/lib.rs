//! Elegoo Neptune 3 Thumbnail
//!
//! This crate post-processes sliced G-code for Elegoo Neptune 3 printers.
//! A screenshot of the sliced scene is scaled down and encoded in the pixel
//! format the printer's LCD firmware understands, then spliced into the
//! output as comment lines right after Cura's generator banner.
//!
//! The base model takes a plain RGB565 hex stream. The Pro, Plus and Max
//! share a compressed format produced by Elegoo's closed `ColPic` library,
//! which is loaded at runtime and degrades to a skip comment when absent.
//!
//! # Example
//!
//! ```rust,no_run
//! use neptune_thumb::{Config, Model, Script};
//!
//! let model = Model::from_settings(true, "pro");
//! let script = Script::new(Config::new(model).lib_dir("plugins/neptune_thumb/lib"));
//!
//! let snapshot = image::open("snapshot.png").ok();
//! let mut layers = vec![";Generated with Cura\nG28".to_string()];
//! script.execute(snapshot.as_ref(), &mut layers);
//! ```

mod colpic;
mod encoder;
mod error;
mod gcode;
mod model;
mod script;
mod settings;

pub use crate::{
    colpic::{is_quarantined, library_filename, library_path, library_status, LibraryStatus},
    encoder::{base_encode_image, pro_encode_image},
    error::Error,
    gcode::{inject_block, CURA_MARKER},
    model::Model,
    script::{Config, Script},
    settings::setting_data,
};

/// Display name of the script, as shown in the host's settings panel.
pub const SCRIPT_NAME: &str = "Elegoo Neptune 3 Thumbnail";

/// Stable identifier of the script inside the host's settings document.
pub const SCRIPT_KEY: &str = "ElegooNeptune3Thumbnail";

/// Recommended screenshot capture size in pixels, square.
///
/// Snapshots are taken large and scaled down per target format, which keeps
/// a single capture sharp for both the small and the large stream.
pub const SNAPSHOT_SIZE: u32 = 800;
