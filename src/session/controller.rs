use crate::assets::decode::PreparedImage;
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::layer::model::{LayerId, LayerPatch, MAX_LAYERS, TextLayer};
use crate::render::compositor::Compositor;
use crate::render::frame::FrameRgba;
use crate::transport::download::{self, DownloadArtifact, RegenerateEndpoint};

/// Vertical origin of the first default layer, in pixels.
pub const LAYER_Y_BASE: f64 = 40.0;

/// Additional vertical origin per already-present layer, so stacked default
/// layers don't land on top of each other.
pub const LAYER_Y_STRIDE: f64 = 40.0;

/// Interactive editing session: the single owner of the live layer
/// collection.
///
/// All mutation goes through [`Session::add_layer`], [`Session::update_layer`]
/// and [`Session::remove_layer`]; rendering is on demand via
/// [`Session::render_preview`]. The background image is attached by the host
/// once its load completes; until then preview and download requests fail
/// gracefully instead of compositing against an unready image.
pub struct Session {
    compositor: Compositor,
    background: Option<PreparedImage>,
    layers: Vec<TextLayer>,
    next_id: u64,
}

impl Session {
    /// Construct a session with no background attached yet.
    pub fn new(compositor: Compositor) -> Self {
        Self {
            compositor,
            background: None,
            layers: Vec::new(),
            next_id: 0,
        }
    }

    /// Attach the decoded background image once the host has loaded it.
    pub fn attach_background(&mut self, image: PreparedImage) {
        self.background = Some(image);
    }

    /// Whether a background image is attached.
    pub fn background_ready(&self) -> bool {
        self.background.is_some()
    }

    /// Current layer collection, in paint order.
    pub fn layers(&self) -> &[TextLayer] {
        &self.layers
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Append a new default-initialized layer and return its fresh id.
    ///
    /// The vertical origin cascades with the current layer count so stacked
    /// default text stays readable. Fails only when the collection is full.
    pub fn add_layer(&mut self) -> ScrawlResult<LayerId> {
        if self.layers.len() >= MAX_LAYERS {
            return Err(ScrawlError::validation(format!(
                "layer limit reached ({MAX_LAYERS})"
            )));
        }

        let id = LayerId(self.next_id);
        self.next_id += 1;

        let mut layer = TextLayer::new(id);
        layer.y = LAYER_Y_BASE + (self.layers.len() as f64) * LAYER_Y_STRIDE;
        self.layers.push(layer);
        Ok(id)
    }

    /// Apply a partial patch to the layer with `id`, preserving its position.
    ///
    /// Silent no-op when no layer matches.
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == id) {
            patch.apply_to(layer);
        }
    }

    /// Remove the layer with `id`. Silent no-op when no layer matches.
    pub fn remove_layer(&mut self, id: LayerId) {
        self.layers.retain(|layer| layer.id != id);
    }

    /// Composite the cached background with the current layer collection.
    ///
    /// On-demand only; nothing re-renders between explicit calls. Two calls
    /// with no intervening mutation return identical bytes.
    pub fn render_preview(&mut self) -> ScrawlResult<FrameRgba> {
        let Some(background) = self.background.as_ref() else {
            return Err(ScrawlError::asset("background image is not ready"));
        };
        self.compositor.composite(background, &self.layers)
    }

    /// Send the current collection through `endpoint` and wrap the response
    /// as a downloadable artifact.
    pub fn request_download(
        &self,
        endpoint: &mut dyn RegenerateEndpoint,
    ) -> ScrawlResult<DownloadArtifact> {
        if self.background.is_none() {
            return Err(ScrawlError::asset("background image is not ready"));
        }
        download::request_download(&self.layers, endpoint)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
