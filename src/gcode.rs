//! Splicing comment blocks into sliced G-code.

/// Comment line Cura writes near the top of its output.
///
/// The thumbnail block goes immediately after this line, which keeps it
/// ahead of the printable moves without disturbing the header the firmware
/// parses for print metadata.
pub const CURA_MARKER: &str = ";Generated with Cura";

/// Insert `block` after the first marker line of every layer that has one.
///
/// Each layer is a newline-joined chunk of G-code. Layers without a line
/// starting with [`CURA_MARKER`] pass through untouched, and only the first
/// match per layer counts.
pub fn inject_block(layers: &mut [String], block: &[String]) {
    for layer in layers.iter_mut() {
        let mut lines: Vec<String> = layer.split('\n').map(str::to_string).collect();
        if let Some(index) = lines.iter().position(|line| line.starts_with(CURA_MARKER)) {
            lines.splice(index + 1..index + 1, block.iter().cloned());
            *layer = lines.join("\n");
        }
    }
}
