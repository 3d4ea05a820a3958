use kurbo::Affine;

use crate::assets::decode::PreparedImage;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::layer::model::{Shadow, TextLayer};
use crate::render::blur::blur_rgba8_premul;
use crate::render::composite::over_in_place;
use crate::render::frame::FrameRgba;
use crate::render::text::TextEngine;

/// Complete shadow drawing state for one paint call.
///
/// Resolved unconditionally for every layer before anything is drawn, so a
/// previous layer's settings can never leak into the next paint. There is no
/// other source of shadow state in the paint path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowState {
    /// Shadow color (straight alpha).
    pub color: Rgba8,
    /// Blur amount in pixels.
    pub blur: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

impl ShadowState {
    /// Fully-neutral state: transparent color, zero blur, zero offsets.
    pub const NEUTRAL: Self = Self {
        color: Rgba8::TRANSPARENT,
        blur: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Resolve the effective shadow state for a layer.
    ///
    /// A disabled shadow resolves to [`ShadowState::NEUTRAL`] regardless of
    /// the parameters stored on the layer.
    pub fn resolve(shadow: &Shadow) -> Self {
        if !shadow.enabled {
            return Self::NEUTRAL;
        }
        Self {
            color: shadow.color,
            blur: shadow.blur.max(0.0),
            offset_x: shadow.offset_x,
            offset_y: shadow.offset_y,
        }
    }

    fn is_visible(&self) -> bool {
        self.color.a > 0
    }
}

/// Renders a background image plus an ordered layer list into a frame.
///
/// Compositing is pure with respect to its inputs: the internal render
/// context and scratch surface are reused across calls but fully reset before
/// every use, so identical inputs produce identical bytes on every
/// invocation.
pub struct Compositor {
    engine: TextEngine,
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
}

impl Compositor {
    /// Construct a compositor over the canonical font bytes.
    pub fn new(font_bytes: Vec<u8>) -> Self {
        Self {
            engine: TextEngine::new(font_bytes),
            ctx: None,
            scratch: None,
        }
    }

    /// Composite `layers` in sequence order over `background`.
    ///
    /// The output has the background's exact dimensions. Empty text,
    /// out-of-bounds coordinates, and an empty layer list are not errors.
    #[tracing::instrument(
        skip(self, background, layers),
        fields(width = background.width, height = background.height, layers = layers.len())
    )]
    pub fn composite(
        &mut self,
        background: &PreparedImage,
        layers: &[TextLayer],
    ) -> ScrawlResult<FrameRgba> {
        let width = background.width;
        let height = background.height;

        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(ScrawlError::render(
                "background dimensions exceed the raster surface limit",
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ScrawlError::render("frame size overflow"))?;
        if background.rgba8_premul.len() != expected {
            return Err(ScrawlError::render(
                "background byte length does not match its dimensions",
            ));
        }

        let mut data = background.rgba8_premul.as_ref().clone();
        for layer in layers {
            self.paint_layer(&mut data, width, height, layer)?;
        }

        Ok(FrameRgba {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Paint one layer's shadow (if any) and glyphs over `dst`.
    fn paint_layer(
        &mut self,
        dst: &mut [u8],
        width: u32,
        height: u32,
        layer: &TextLayer,
    ) -> ScrawlResult<()> {
        // The effective shadow state is resolved before any drawing, for
        // every layer, enabled or not.
        let shadow = ShadowState::resolve(&layer.shadow);

        if layer.text.is_empty() {
            return Ok(());
        }

        let layout = self
            .engine
            .layout(&layer.text, layer.font_size as f32, layer.color)?;
        // (x, y) addresses the alphabetic baseline; parley lays out from the
        // top of the line box.
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);

        if shadow.is_visible() {
            let origin = Affine::translate((
                layer.x + shadow.offset_x,
                layer.y + shadow.offset_y - baseline,
            ));
            let mut pixels = self.rasterize(width, height, &layout, shadow.color, origin)?;
            if shadow.blur > 0.0 {
                let radius = shadow.blur.ceil() as u32;
                let sigma = (shadow.blur * 0.5) as f32;
                pixels = blur_rgba8_premul(&pixels, width, height, radius, sigma)?;
            }
            over_in_place(dst, &pixels)?;
        }

        let origin = Affine::translate((layer.x, layer.y - baseline));
        let pixels = self.rasterize(width, height, &layout, layer.color, origin)?;
        over_in_place(dst, &pixels)?;

        Ok(())
    }

    /// Rasterize a shaped layout with a single paint color into a
    /// frame-sized premultiplied RGBA8 buffer.
    fn rasterize(
        &mut self,
        width: u32,
        height: u32,
        layout: &parley::Layout<Rgba8>,
        paint: Rgba8,
        transform: Affine,
    ) -> ScrawlResult<Vec<u8>> {
        let w: u16 = width
            .try_into()
            .map_err(|_| ScrawlError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ScrawlError::render("surface height exceeds u16"))?;

        let font = self.engine.font_data()?;

        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(w, h),
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            Some(_) => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            paint.r, paint.g, paint.b, paint.a,
        ));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = match self.scratch.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut pixmap);

        let out = pixmap.data_as_u8_slice().to_vec();
        self.scratch = Some(pixmap);
        self.ctx = Some(ctx);
        Ok(out)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
