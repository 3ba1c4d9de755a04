//! Pixel stream encoders for the Neptune 3 screen firmware.
//!
//! Both printer generations take RGB565 pixels as ASCII embedded in G-code
//! comments, but the framing differs. The base model reads an uncompressed
//! hex stream with a marker after every scanline. The Pro, Plus and Max
//! read a compressed stream produced by the vendor library, wrapped into
//! fixed width lines with a zero padded trailer.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};
use log::debug;

use crate::colpic;
use crate::error::Error;

/// Scanline terminator recognized by the base model firmware.
const ROW_MARKER: &str = "\rM10086 ;";

/// Payload characters per emitted line on the Pro/Plus/Max: a 1024 byte
/// firmware line buffer minus the 8 character tag and the carriage return.
const EACH_MAX: usize = 1024 - 8 - 1;

/// Pack 8-bit channels into RGB565.
fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Scale `img` to fit inside `width` x `height`, keeping the aspect ratio.
///
/// Images already at the requested dimensions pass through untouched.
fn scale_to_fit(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    img.resize(width, height, FilterType::Lanczos3)
}

/// RGB565 samples of `img` in row-major order, top left first.
fn rgb565_samples(img: &RgbaImage) -> Vec<u16> {
    let mut samples = Vec::with_capacity((img.width() * img.height()) as usize);
    for pixel in img.pixels() {
        let image::Rgba([r, g, b, _]) = *pixel;
        samples.push(rgb565(r, g, b));
    }
    samples
}

/// Encode `img` as the uncompressed hex stream the base model renders.
///
/// The image is scaled to fit `width` x `height` first and the stream
/// covers the scaled dimensions, so a non-square input produces fewer rows
/// or columns than requested. Every pixel becomes four hex digits with the
/// low byte first, and every scanline is closed by the `M10086` marker.
pub fn base_encode_image(img: &DynamicImage, width: u32, height: u32, img_type: &str) -> String {
    let scaled = scale_to_fit(img, width, height).to_rgba8();
    let (w, h) = scaled.dimensions();
    debug!("base encoding {}x{} pixels as {}", w, h, img_type);

    let row_len = w as usize * 4 + ROW_MARKER.len();
    let mut result = String::with_capacity(img_type.len() + row_len * h as usize + 1);
    result.push_str(img_type);
    for y in 0..h {
        for x in 0..w {
            let image::Rgba([r, g, b, _]) = *scaled.get_pixel(x, y);
            let hex = format!("{:04x}", rgb565(r, g, b));
            // low byte first
            result.push_str(&hex[2..4]);
            result.push_str(&hex[0..2]);
        }
        result.push_str(ROW_MARKER);
        if y == h - 1 {
            result.push('\r');
        }
    }
    result
}

/// Encode `img` as the compressed stream the Pro, Plus and Max render.
///
/// Compression runs through the vendor library at `lib_path`. Any failure
/// on that path is logged and collapses to an empty string, which callers
/// treat as "no image data" rather than an error.
pub fn pro_encode_image(
    img: &DynamicImage,
    width: u32,
    height: u32,
    img_type: &str,
    lib_path: &Path,
) -> String {
    match try_pro_encode(img, width, height, img_type, lib_path) {
        Ok(encoded) => encoded,
        Err(err) => {
            debug!("pro encode failed: {}", err);
            String::new()
        }
    }
}

fn try_pro_encode(
    img: &DynamicImage,
    width: u32,
    height: u32,
    img_type: &str,
    lib_path: &Path,
) -> Result<String, Error> {
    let scaled = scale_to_fit(img, width, height).to_rgba8();
    let (w, h) = scaled.dimensions();
    let raw = colpic::encode(lib_path, &rgb565_samples(&scaled), w, h)?;

    // the vendor call NUL terminates and zero fills its buffer; only the
    // printable payload goes out on the wire
    let data1: String = raw
        .iter()
        .filter(|&&byte| byte != 0)
        .map(|&byte| byte as char)
        .collect();
    debug!("compressed {}x{} pixels into {} bytes", w, h, data1.len());

    let mut result = frame_payload(&data1, img_type);
    result.push('\r');
    Ok(result)
}

/// Wrap the compressed payload into tagged lines with a zero padded trailer.
///
/// The branch order is load bearing: the final-line check runs before the
/// first-character check, so a payload shorter than [`EACH_MAX`] opens with
/// `\r;` ahead of the tag, and a payload that is an exact multiple of
/// [`EACH_MAX`] never reaches the final-line branch at all. The firmware
/// expects exactly this framing.
fn frame_payload(data1: &str, img_type: &str) -> String {
    let max_line = data1.len() / EACH_MAX;
    // negative when the tail nearly fills a line; then nothing is padded
    let append_len = EACH_MAX as i64 - 3 - (data1.len() % EACH_MAX) as i64;

    let mut result = String::with_capacity(data1.len() + EACH_MAX);
    for (i, ch) in data1.chars().enumerate() {
        if i == max_line * EACH_MAX {
            result.push_str("\r;");
            result.push_str(img_type);
            result.push(ch);
        } else if i == 0 {
            result.push_str(img_type);
            result.push(ch);
        } else if i % EACH_MAX == 0 {
            result.push('\r');
            result.push_str(img_type);
            result.push(ch);
        } else {
            result.push(ch);
        }
    }
    result.push_str("\r;");
    for _ in 0..append_len {
        result.push('0');
    }
    result
}
