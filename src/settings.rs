//! Settings definition document for the host's post-processing panel.
//!
//! The host builds its GUI from a JSON document the script hands over. While
//! the vendor library is usable the panel offers the enable flag and the
//! model picker; while it is missing or quarantined the panel turns into
//! step-by-step install instructions instead, rendered through the checkbox
//! workaround at the bottom of this file.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{json, Map, Value};

use crate::colpic::{self, LibraryStatus};
use crate::{SCRIPT_KEY, SCRIPT_NAME};

/// Where Elegoo publishes the Cura build that carries the vendor library.
const DOWNLOAD_URL: &str = "https://www.elegoo.com/pages/3d-printing-user-support";

/// Characters per panel row before the host starts word wrapping labels.
const WRAP_WIDTH: usize = 45;

/// Build the settings document, reflecting the state of the library at
/// `lib_path`.
///
/// When the library is missing its directory is created on the spot, so the
/// instructions can tell the user to drop the file into a path that exists.
pub fn setting_data(lib_path: &Path) -> String {
    let settings = match colpic::library_status(lib_path) {
        LibraryStatus::Ready => model_settings(),
        LibraryStatus::Missing(path) => {
            if let Some(dir) = path.parent() {
                if let Err(err) = fs::create_dir_all(dir) {
                    debug!("could not create {}: {}", dir.display(), err);
                }
            }
            checkbox_message(&download_instructions(&path))
        }
        LibraryStatus::Quarantined(path) => checkbox_message(&quarantine_instructions(&path)),
    };

    let document = json!({
        "name": SCRIPT_NAME,
        "key": SCRIPT_KEY,
        "metadata": {},
        // schema version of the settings document, not the crate version
        "version": 2,
        "settings": settings
    });
    format!("{:#}", document)
}

/// The normal panel: an enable flag plus the model picker.
fn model_settings() -> Value {
    json!({
        "enabled": {
            "label": "Enabled",
            "description": "If unchecked, this script will be disabled.",
            "type": "bool",
            "default_value": true
        },
        "elegoo_model": {
            "label": "Neptune 3 Type",
            "description": "The type of printer.",
            "type": "enum",
            "options": {
                "base": "Base",
                "pro": "Pro/Plus/Max"
            },
            "default_value": "pro"
        }
    })
}

fn download_instructions(path: &Path) -> Vec<String> {
    let mut lines = vec![
        "Additional steps required!".to_string(),
        format!(
            "You need to get the image encoding library from Elegoo Cura, found on their website: {}",
            DOWNLOAD_URL
        ),
        format!(
            "It's the file {} in: Cura/plugins/MKS Plugin",
            colpic::library_filename()
        ),
        format!("It must be placed at: {}", path.display()),
    ];
    if cfg!(target_os = "macos") {
        lines.push(
            "After placing it there, right click it, then click Open, then Open, to remove it from quarantine."
                .to_string(),
        );
    }
    lines.push("Then restart Cura!".to_string());
    lines
}

fn quarantine_instructions(path: &Path) -> Vec<String> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    vec![
        "Additional steps required!".to_string(),
        format!(
            "You're using macOS, and the image encoding library is under quarantine: {}",
            path.display()
        ),
        format!("Right click {}, click 'Open', then click the Open button.", file),
        "Then restart Cura!".to_string(),
    ]
}

/// Render message lines as settings entries.
///
/// The host panel has no plain text element, so every line becomes a
/// disabled checkbox whose label carries the text. Lines wider than the
/// panel get blank spacer entries, half before and half after, which keeps
/// the wrapped-around tail from colliding with the neighboring rows.
fn checkbox_message(lines: &[String]) -> Value {
    let mut entries = Map::new();
    for (i, line) in lines.iter().enumerate() {
        let mut spacers = line.len() / WRAP_WIDTH;
        spacers += spacers % 2;

        for j in 0..spacers / 2 {
            entries.insert(format!("spacer{}_{}", i, j), spacer_entry());
        }
        entries.insert(format!("message{}", i), message_entry(line));
        for j in spacers / 2..spacers {
            entries.insert(format!("spacer{}_{}", i, j), spacer_entry());
        }
    }
    Value::Object(entries)
}

fn spacer_entry() -> Value {
    json!({
        "label": "",
        "description": "Oops! Additional steps required!",
        "type": "bool",
        "default_value": false
    })
}

fn message_entry(line: &str) -> Value {
    json!({
        "label": line,
        "description": "Oops! Additional steps required!",
        "type": "bool",
        "default_value": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neptune-thumb-{}", name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn normal_panel_offers_the_closed_model_set() {
        let dir = scratch_dir("normal-panel");
        let lib = colpic::library_path(&dir);
        fs::write(&lib, b"stub").unwrap();

        let doc = setting_data(&lib);
        let parsed: Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(parsed["name"], SCRIPT_NAME);
        assert_eq!(parsed["key"], SCRIPT_KEY);
        assert_eq!(parsed["version"], 2);
        assert_eq!(parsed["settings"]["enabled"]["type"], "bool");
        assert_eq!(parsed["settings"]["enabled"]["default_value"], true);

        let model = &parsed["settings"]["elegoo_model"];
        assert_eq!(model["type"], "enum");
        assert_eq!(model["options"]["base"], "Base");
        assert_eq!(model["options"]["pro"], "Pro/Plus/Max");
        assert_eq!(model["default_value"], "pro");
    }

    #[test]
    fn missing_library_turns_the_panel_into_instructions() {
        let dir = scratch_dir("missing-panel").join("lib");
        let lib = colpic::library_path(&dir);
        let _ = fs::remove_file(&lib);

        let doc = setting_data(&lib);
        let parsed: Value = serde_json::from_str(&doc).unwrap();

        let settings = parsed["settings"].as_object().unwrap();
        assert_eq!(settings["message0"]["label"], "Additional steps required!");
        assert!(doc.contains(DOWNLOAD_URL));
        assert!(doc.contains("Then restart Cura!"));
        assert!(!doc.contains("elegoo_model"));
        // the drop-in directory is created as a side effect
        assert!(dir.is_dir());
    }

    #[test]
    fn quarantine_instructions_name_the_file_and_the_fix() {
        let path = Path::new("lib").join("libColPic.dylib");
        let msg = quarantine_instructions(&path);
        assert_eq!(msg[0], "Additional steps required!");
        assert!(msg[1].contains("quarantine"));
        assert!(msg[1].contains("libColPic.dylib"));
        assert!(msg[2].starts_with("Right click libColPic.dylib"));
        assert_eq!(msg.last().unwrap(), "Then restart Cura!");
    }

    #[test]
    fn short_lines_get_no_spacers() {
        let rendered = checkbox_message(&lines(&["short"]));
        let entries = rendered.as_object().unwrap();
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["message0"]);
    }

    #[test]
    fn long_lines_are_bracketed_by_an_even_spacer_count() {
        let long = "x".repeat(50);
        let rendered = checkbox_message(&lines(&["hi", &long]));
        let entries = rendered.as_object().unwrap();
        let keys: Vec<&String> = entries.keys().collect();
        assert_eq!(keys, vec!["message0", "spacer1_0", "message1", "spacer1_1"]);
    }

    #[test]
    fn spacer_count_scales_with_line_width() {
        // 100 characters give two spacers, one on either side
        let very_long = "y".repeat(100);
        let rendered = checkbox_message(&lines(&[&very_long]));
        let entries = rendered.as_object().unwrap();
        let keys: Vec<&String> = entries.keys().collect();
        assert_eq!(keys, vec!["spacer0_0", "message0", "spacer0_1"]);
    }
}
