//! Wire payload between the interactive session and the regenerator.
//!
//! The payload is the ordered layer collection serialized as a JSON array.
//! Field names are preserved and every numeric style field travels as a JSON
//! number; `font_size` in particular is numeric on the wire, never a display
//! string.

use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::layer::model::{MAX_LAYERS, TextLayer};

/// Serialize an ordered layer collection to payload bytes.
pub fn encode_layers(layers: &[TextLayer]) -> ScrawlResult<Vec<u8>> {
    serde_json::to_vec(layers).map_err(|e| ScrawlError::serde(format!("encode layer payload: {e}")))
}

/// Deserialize and validate a layer payload.
///
/// Malformed payloads (wrong shape, missing required field, non-numeric where
/// a number is required) and out-of-bound values are rejected here, before
/// any resource is loaded or any compositing is attempted.
pub fn decode_layers(bytes: &[u8]) -> ScrawlResult<Vec<TextLayer>> {
    let layers: Vec<TextLayer> = serde_json::from_slice(bytes)
        .map_err(|e| ScrawlError::serde(format!("decode layer payload: {e}")))?;

    if layers.len() > MAX_LAYERS {
        return Err(ScrawlError::validation(format!(
            "payload exceeds {MAX_LAYERS} layers"
        )));
    }
    for layer in &layers {
        layer.validate()?;
    }

    Ok(layers)
}

#[cfg(test)]
#[path = "../../tests/unit/transport/wire.rs"]
mod tests;
