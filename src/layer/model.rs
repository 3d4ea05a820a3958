use std::fmt;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{ScrawlError, ScrawlResult};

/// Maximum number of layers in one collection (session or wire payload).
pub const MAX_LAYERS: usize = 64;

/// Maximum UTF-8 length of one layer's text, in bytes.
pub const MAX_TEXT_BYTES: usize = 1024;

/// Maximum shadow blur in pixels; bounds the blur kernel size.
pub const MAX_SHADOW_BLUR: f64 = 256.0;

/// Font size assigned to freshly created layers, in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Horizontal origin assigned to freshly created layers, in pixels.
pub const DEFAULT_LAYER_X: f64 = 20.0;

/// Opaque per-session layer identifier.
///
/// Generated from a monotonically increasing counter and never reused within a
/// session; the sole key for update/remove operations.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drop-shadow configuration for one layer.
///
/// Every field is always populated; a disabled shadow keeps its stored
/// parameters but has no observable effect on output.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    /// Whether the shadow is drawn at all.
    #[serde(default)]
    pub enabled: bool,
    /// Shadow color.
    #[serde(default = "default_shadow_color")]
    pub color: Rgba8,
    /// Blur amount in pixels; 0 gives a hard-edged shadow.
    #[serde(default = "default_shadow_blur")]
    pub blur: f64,
    /// Horizontal shadow offset in pixels.
    #[serde(default = "default_shadow_offset")]
    pub offset_x: f64,
    /// Vertical shadow offset in pixels.
    #[serde(default = "default_shadow_offset")]
    pub offset_y: f64,
}

fn default_shadow_color() -> Rgba8 {
    Rgba8::BLACK
}

fn default_shadow_blur() -> f64 {
    4.0
}

fn default_shadow_offset() -> f64 {
    2.0
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            color: default_shadow_color(),
            blur: default_shadow_blur(),
            offset_x: default_shadow_offset(),
            offset_y: default_shadow_offset(),
        }
    }
}

impl Shadow {
    /// Validate shadow parameter ranges.
    pub fn validate(&self) -> ScrawlResult<()> {
        if !self.blur.is_finite() || self.blur < 0.0 || self.blur > MAX_SHADOW_BLUR {
            return Err(ScrawlError::validation(format!(
                "shadow blur must be finite and in 0..={MAX_SHADOW_BLUR}"
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(ScrawlError::validation("shadow offsets must be finite"));
        }
        Ok(())
    }
}

/// One styled text overlay.
///
/// Collection order is paint order: later layers paint over earlier ones and
/// over the background. `(x, y)` is the left edge of the text at its
/// alphabetic baseline, in surface pixels; out-of-bounds values simply render
/// off-canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayer {
    /// Stable identifier, unique within a session.
    pub id: LayerId,
    /// Text content; may be empty (renders nothing).
    pub text: String,
    /// Glyph fill color.
    pub color: Rgba8,
    /// Baseline origin, horizontal.
    pub x: f64,
    /// Baseline origin, vertical.
    pub y: f64,
    /// Font size in pixels; the family is fixed system-wide.
    pub font_size: u32,
    /// Drop-shadow settings.
    #[serde(default)]
    pub shadow: Shadow,
}

impl TextLayer {
    /// Construct a default layer with every style field populated.
    pub fn new(id: LayerId) -> Self {
        Self {
            id,
            text: String::new(),
            color: Rgba8::WHITE,
            x: DEFAULT_LAYER_X,
            y: 0.0,
            font_size: DEFAULT_FONT_SIZE,
            shadow: Shadow::default(),
        }
    }

    /// Validate layer invariants.
    pub fn validate(&self) -> ScrawlResult<()> {
        if self.font_size == 0 {
            return Err(ScrawlError::validation(format!(
                "layer {} font_size must be > 0",
                self.id
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ScrawlError::validation(format!(
                "layer {} position must be finite",
                self.id
            )));
        }
        if self.text.len() > MAX_TEXT_BYTES {
            return Err(ScrawlError::validation(format!(
                "layer {} text exceeds {MAX_TEXT_BYTES} bytes",
                self.id
            )));
        }
        self.shadow.validate()
    }
}

/// Field-level partial patch for [`Shadow`].
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShadowPatch {
    /// New enabled state, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New shadow color, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// New blur amount, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    /// New horizontal offset, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// New vertical offset, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
}

/// Field-level partial patch for [`TextLayer`].
///
/// Applied with [`LayerPatch::apply_to`]: present fields overwrite, absent
/// fields keep their prior values. The layer id is not patchable.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LayerPatch {
    /// New text content, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New fill color, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// New horizontal origin, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New vertical origin, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New font size, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Shadow field patches, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowPatch>,
}

impl LayerPatch {
    /// Merge this patch into `layer`, field by field.
    pub fn apply_to(&self, layer: &mut TextLayer) {
        if let Some(text) = &self.text {
            layer.text = text.clone();
        }
        if let Some(color) = self.color {
            layer.color = color;
        }
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(font_size) = self.font_size {
            layer.font_size = font_size;
        }
        if let Some(shadow) = &self.shadow {
            if let Some(enabled) = shadow.enabled {
                layer.shadow.enabled = enabled;
            }
            if let Some(color) = shadow.color {
                layer.shadow.color = color;
            }
            if let Some(blur) = shadow.blur {
                layer.shadow.blur = blur;
            }
            if let Some(offset_x) = shadow.offset_x {
                layer.shadow.offset_x = offset_x;
            }
            if let Some(offset_y) = shadow.offset_y {
                layer.shadow.offset_y = offset_y;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/model.rs"]
mod tests;
