use std::sync::Arc;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{ScrawlError, ScrawlResult};

#[derive(Clone)]
pub(crate) struct RegisteredFont {
    pub(crate) family_name: String,
    pub(crate) font_data: vello_cpu::peniko::FontData,
}

/// Shapes plain text in the canonical font at per-layer sizes.
///
/// The system uses exactly one font family: whatever the canonical font bytes
/// provide. Registration happens lazily on the first layout so a composite
/// with no visible text needs no font at all.
pub struct TextEngine {
    font_bytes: Arc<Vec<u8>>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    registered: Option<RegisteredFont>,
}

impl TextEngine {
    /// Construct an engine over the canonical font bytes.
    pub fn new(font_bytes: Vec<u8>) -> Self {
        Self {
            font_bytes: Arc::new(font_bytes),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: None,
        }
    }

    /// Primary family name of the canonical font.
    pub fn family_name(&mut self) -> ScrawlResult<String> {
        Ok(self.registered()?.family_name)
    }

    pub(crate) fn font_data(&mut self) -> ScrawlResult<vello_cpu::peniko::FontData> {
        Ok(self.registered()?.font_data)
    }

    fn registered(&mut self) -> ScrawlResult<RegisteredFont> {
        if let Some(reg) = self.registered.clone() {
            return Ok(reg);
        }

        if self.font_bytes.is_empty() {
            return Err(ScrawlError::asset("canonical font bytes are empty"));
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(self.font_bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ScrawlError::asset("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ScrawlError::asset("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.font_bytes.as_ref().clone()),
            0,
        );

        let reg = RegisteredFont {
            family_name,
            font_data,
        };
        self.registered = Some(reg.clone());
        Ok(reg)
    }

    /// Shape and lay out plain text at `size_px` with the given fill brush.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> ScrawlResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ScrawlError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.registered()?.family_name;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(layout)
    }
}
