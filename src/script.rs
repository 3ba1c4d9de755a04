//! The post-processing entry point tying the pieces together.

use std::path::PathBuf;

use image::DynamicImage;
use log::{debug, info, warn};

use crate::colpic;
use crate::encoder::{base_encode_image, pro_encode_image};
use crate::gcode;
use crate::model::Model;
use crate::settings;
use crate::SCRIPT_KEY;

/// Script configuration.
///
/// # Example
///
/// ```
/// use neptune_thumb::{Config, Model};
///
/// let config = Config::new(Model::ProPlusMax).lib_dir("plugins/neptune_thumb/lib");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    model: Model,
    lib_dir: PathBuf,
}

impl Config {
    /// Initialize configuration for a resolved printer variant.
    ///
    /// The vendor library is expected in the `lib` directory next to the
    /// working directory unless [`Config::lib_dir`] points elsewhere.
    pub fn new(model: Model) -> Config {
        Config {
            model,
            lib_dir: PathBuf::from("lib"),
        }
    }

    /// Override the directory that holds the vendor library.
    pub fn lib_dir(self, dir: impl Into<PathBuf>) -> Self {
        Config {
            lib_dir: dir.into(),
            ..self
        }
    }
}

/// Post-processing script that stamps a thumbnail block into sliced G-code.
pub struct Script {
    config: Config,
}

impl Script {
    pub fn new(config: Config) -> Script {
        Script { config }
    }

    /// Splice the thumbnail block into `layers`.
    ///
    /// `snapshot` is the screenshot of the sliced scene, if the host could
    /// take one; `None` records a skip comment instead. Layers without the
    /// Cura marker line pass through untouched.
    pub fn execute(&self, snapshot: Option<&DynamicImage>, layers: &mut [String]) {
        let block = match snapshot {
            Some(image) => self.snapshot_block(image),
            None => {
                warn!("no snapshot available, recording a skip comment");
                vec![skip_comment("couldn't take screenshot")]
            }
        };
        gcode::inject_block(layers, &block);
    }

    /// Settings document for the host panel, reflecting whether the vendor
    /// library is currently usable.
    pub fn setting_data(&self) -> String {
        settings::setting_data(&colpic::library_path(&self.config.lib_dir))
    }

    /// Build the comment block for the configured variant: a line naming
    /// the printer, then the encoded payload or a skip comment.
    fn snapshot_block(&self, snapshot: &DynamicImage) -> Vec<String> {
        let model = self.config.model;
        info!("generating thumbnail for Neptune 3 {}", model.label());

        let payload = match model {
            Model::Base => format!(
                "{}{}",
                base_encode_image(snapshot, 100, 100, ";simage:"),
                base_encode_image(snapshot, 200, 200, ";;gimage:")
            ),
            Model::ProPlusMax => {
                let lib_path = colpic::library_path(&self.config.lib_dir);
                let encoded = format!(
                    "{}{}",
                    pro_encode_image(snapshot, 200, 200, ";gimage:", &lib_path),
                    pro_encode_image(snapshot, 160, 160, ";simage:", &lib_path)
                );
                if encoded.is_empty() {
                    debug!("vendor encoder produced no data, skipping");
                    skip_comment("encoder library unavailable")
                } else {
                    encoded
                }
            }
            Model::Disabled | Model::Unknown => skip_comment(model.label()),
        };

        vec![
            format!("; thumbnail for Neptune 3 {}", model.label()),
            payload,
        ]
    }
}

fn skip_comment(reason: &str) -> String {
    format!("; {}: skipped thumbnail generation: {}", SCRIPT_KEY, reason)
}
