//! Wire format for the solve service.
//!
//! Request: `{ "image": "data:image/png;base64,...", "dict_of_vars": {..} }`
//! Response: `{ "message": .., "type": "success" | "error", "data": [entry..] }`
//! where each entry is `{ "expr", "result", "assign" }`.

use crate::error::{Result, SolveError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::{ExtendedColorType, ImageEncoder, ImageError};
use ink_core::{SolveEntry, Surface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode the whole surface (transparent background included) as PNG.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(SolveError::Encode(ImageError::Parameter(
            ParameterError::from_kind(ParameterErrorKind::DimensionMismatch),
        )));
    }
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        surface.as_rgba(),
        surface.width(),
        surface.height(),
        ExtendedColorType::Rgba8,
    )?;
    log::trace!(
        "encoded {}x{} surface to {} png bytes",
        surface.width(),
        surface.height(),
        png.len()
    );
    Ok(png)
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

/// Recover the raw bytes from a base64 data URI (everything after the first comma).
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_, data) = uri
        .split_once(',')
        .ok_or_else(|| SolveError::MalformedResponse("data uri has no ',' separator".into()))?;
    STANDARD
        .decode(data)
        .map_err(|e| SolveError::MalformedResponse(format!("bad base64 payload: {e}")))
}

/// Body of a solve `POST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub image: String,
    pub dict_of_vars: BTreeMap<String, String>,
}

impl SolveRequest {
    /// Snapshot the surface and variables into a request body.
    pub fn from_surface(surface: &Surface, vars: BTreeMap<String, String>) -> Result<Self> {
        let png = encode_png(surface)?;
        Ok(Self {
            image: png_data_uri(&png),
            dict_of_vars: vars,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SolveResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    data: Option<Vec<SolveEntry>>,
}

/// Parse a solve response body into its ordered entries.
pub fn parse_response(body: &[u8]) -> Result<Vec<SolveEntry>> {
    let resp: SolveResponse =
        serde_json::from_slice(body).map_err(|e| SolveError::MalformedResponse(e.to_string()))?;

    if resp.kind.as_deref() == Some("error") {
        return Err(SolveError::Rejected(
            resp.message.unwrap_or_else(|| "no message".to_string()),
        ));
    }
    resp.data
        .ok_or_else(|| SolveError::MalformedResponse("missing `data` array".into()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub message: String,
}
