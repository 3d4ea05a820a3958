use std::path::PathBuf;

use image::ImageEncoder as _;

use crate::assets::decode;
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::render::compositor::Compositor;
use crate::render::frame::FrameRgba;
use crate::transport::download::{EncodedImage, RegenerateEndpoint};
use crate::transport::wire;

/// Media type of the download artifact.
pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";

/// Suggested file name for the download artifact.
pub const DOWNLOAD_FILE_NAME: &str = "canvas.jpg";

/// Configuration for the regenerator service.
#[derive(Clone, Debug)]
pub struct RegeneratorConfig {
    /// Path to the canonical background image.
    pub background_path: PathBuf,
    /// Path to the canonical font file.
    pub font_path: PathBuf,
    /// JPEG encode quality, 1..=100.
    pub jpeg_quality: u8,
}

impl RegeneratorConfig {
    /// Configuration with the default JPEG quality (90).
    pub fn new(background_path: impl Into<PathBuf>, font_path: impl Into<PathBuf>) -> Self {
        Self {
            background_path: background_path.into(),
            font_path: font_path.into(),
            jpeg_quality: 90,
        }
    }
}

/// Stateless regeneration service.
///
/// Each request is one atomic unit of work over freshly loaded resources: the
/// canonical background and font are read from disk per request (the
/// interactive session's cache is a different process and is never shared),
/// composited with the identical algorithm the preview uses, and encoded.
pub struct Regenerator {
    config: RegeneratorConfig,
}

impl Regenerator {
    /// Construct a regenerator from its configuration.
    pub fn new(config: RegeneratorConfig) -> Self {
        Self { config }
    }

    /// Access the service configuration.
    pub fn config(&self) -> &RegeneratorConfig {
        &self.config
    }
}

impl RegenerateEndpoint for Regenerator {
    #[tracing::instrument(skip(self, payload), fields(payload_bytes = payload.len()))]
    fn regenerate(&mut self, payload: &[u8]) -> ScrawlResult<EncodedImage> {
        // Malformed payloads are rejected before any resource is touched.
        let layers = wire::decode_layers(payload)?;

        let background = decode::load_image(&self.config.background_path)?;
        let font_bytes = decode::load_font(&self.config.font_path)?;

        let mut compositor = Compositor::new(font_bytes);
        let frame = compositor.composite(&background, &layers)?;

        let bytes = encode_jpeg(&frame, self.config.jpeg_quality)?;
        Ok(EncodedImage {
            content_type: CONTENT_TYPE_JPEG.to_string(),
            file_name: DOWNLOAD_FILE_NAME.to_string(),
            content_length: bytes.len(),
            bytes,
        })
    }
}

/// Encode a frame as baseline JPEG.
///
/// JPEG carries no alpha; the frame is converted to straight alpha and the
/// alpha channel dropped (the background is opaque, so the frame is too).
pub fn encode_jpeg(frame: &FrameRgba, quality: u8) -> ScrawlResult<Vec<u8>> {
    let rgba = frame.to_straight_rgba();
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| ScrawlError::render(format!("encode jpeg: {e}")))?;
    Ok(out)
}
