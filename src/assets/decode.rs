use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{ScrawlError, ScrawlResult};

/// Decoded background image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ScrawlResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ScrawlError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file.
///
/// Load failure is fatal for any render attempt; no fallback image is
/// substituted.
pub fn load_image(path: &Path) -> ScrawlResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| ScrawlError::asset(format!("read image '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

/// Read the canonical font file.
pub fn load_font(path: &Path) -> ScrawlResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(|e| ScrawlError::asset(format!("read font '{}': {e}", path.display())))?;
    if bytes.is_empty() {
        return Err(ScrawlError::asset(format!(
            "font '{}' is empty",
            path.display()
        )));
    }
    Ok(bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
