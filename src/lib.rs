//! scrawl composites ordered styled text labels onto a fixed background image.
//!
//! The same deterministic CPU pipeline serves two call paths:
//!
//! 1. **Preview**: a [`Session`] owns the live layer collection and invokes the
//!    [`Compositor`] in-process on demand.
//! 2. **Download**: the collection is serialized ([`encode_layers`]), handed to
//!    a [`RegenerateEndpoint`] (in-process: the [`Regenerator`]), composited
//!    with the identical algorithm against a freshly loaded background, and
//!    encoded as JPEG.
//!
//! Because both paths execute the same raster code over the same inputs, the
//! downloaded artifact matches the on-screen preview pixel for pixel (modulo
//! the lossy encode).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: compositing is pure and stable for a given
//!   input; no reliance on prior surface state.
//! - **No IO in the compositor**: image and font bytes are loaded up front and
//!   passed in decoded.
//! - **Premultiplied RGBA8** end-to-end until encode.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod layer;
mod render;
mod service;
mod session;
mod transport;

pub use assets::decode::{PreparedImage, decode_image, load_font, load_image};
pub use foundation::color::Rgba8;
pub use foundation::error::{ScrawlError, ScrawlResult};
pub use layer::model::{
    DEFAULT_FONT_SIZE, DEFAULT_LAYER_X, LayerId, LayerPatch, MAX_LAYERS, MAX_SHADOW_BLUR,
    MAX_TEXT_BYTES, Shadow, ShadowPatch, TextLayer,
};
pub use render::blur::blur_rgba8_premul;
pub use render::composite::{over, over_in_place};
pub use render::compositor::{Compositor, ShadowState};
pub use render::frame::FrameRgba;
pub use render::text::TextEngine;
pub use service::regenerator::{
    CONTENT_TYPE_JPEG, DOWNLOAD_FILE_NAME, Regenerator, RegeneratorConfig, encode_jpeg,
};
pub use session::controller::{LAYER_Y_BASE, LAYER_Y_STRIDE, Session};
pub use transport::download::{DownloadArtifact, EncodedImage, RegenerateEndpoint, request_download};
pub use transport::wire::{decode_layers, encode_layers};
