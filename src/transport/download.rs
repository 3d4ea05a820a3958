use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::layer::model::TextLayer;
use crate::transport::wire;

/// Encoded image returned by a regeneration endpoint, with the response
/// attributes the download path requires: content type, a suggested file
/// name, and the exact body length.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    /// Media type of `bytes`, e.g. `image/jpeg`.
    pub content_type: String,
    /// Suggested file name for the save-as action.
    pub file_name: String,
    /// Exact byte length of `bytes`.
    pub content_length: usize,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// A downloadable artifact ready to hand to the host's save-as action.
///
/// Dropping the artifact releases the transient resource; nothing else holds
/// the bytes.
#[derive(Clone, Debug)]
pub struct DownloadArtifact {
    /// File name suggested by the regenerator.
    pub file_name: String,
    /// Media type of `bytes`.
    pub media_type: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// The out-of-context rendering seam between session and regenerator.
///
/// The in-process implementation is [`crate::Regenerator`]; an HTTP host
/// implements this with a single POST of the payload body.
pub trait RegenerateEndpoint {
    /// Regenerate the composite for a serialized layer payload.
    fn regenerate(&mut self, payload: &[u8]) -> ScrawlResult<EncodedImage>;
}

/// Run one download exchange: serialize, send, and wrap the response.
///
/// A single request/response with no retry; endpoint failure surfaces as an
/// error and no artifact is produced. A response whose declared length does
/// not match its body is rejected rather than saved as a partial file.
pub fn request_download(
    layers: &[TextLayer],
    endpoint: &mut dyn RegenerateEndpoint,
) -> ScrawlResult<DownloadArtifact> {
    let payload = wire::encode_layers(layers)?;
    let response = endpoint.regenerate(&payload)?;

    if response.content_length != response.bytes.len() {
        return Err(ScrawlError::transport(format!(
            "declared content length {} does not match body size {}",
            response.content_length,
            response.bytes.len()
        )));
    }

    Ok(DownloadArtifact {
        file_name: response.file_name,
        media_type: response.content_type,
        bytes: response.bytes,
    })
}
