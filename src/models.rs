use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A user-chosen file, read into memory but not yet validated.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Read a file from disk into a [`CandidateFile`].
///
/// This is the terminal stand-in for a browser file picker: the UI adapter
/// calls it and hands the app layer plain data, never a path.
pub fn load_candidate(path: &Path) -> anyhow::Result<CandidateFile> {
    use anyhow::Context;

    let bytes =
        std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(CandidateFile {
        name,
        mime_type: mime_for_path(path),
        bytes,
    })
}

/// Guess a mime type from the file extension.
///
/// Covers the extension set the service accepts; anything else maps to
/// `application/octet-stream`, which validation rejects.
pub fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Transport-encoded image reference returned by the service (a data URI or
/// URL). Opaque to the client: displayed, and passed back for download.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mime type of a data URI reference, if that's what this is.
    pub fn data_uri_mime(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }

    /// Decoded payload size for a base64 data URI, `None` for other encodings.
    pub fn payload_len(&self) -> Option<usize> {
        let (_, payload) = self.0.split_once("base64,")?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .ok()
            .map(|b| b.len())
    }
}

/// The two image references produced by a successful conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct SketchPair {
    pub original: ImageRef,
    pub sketch: ImageRef,
}

/// JSON reply from `POST /convert`.
#[derive(Clone, Debug, Deserialize)]
pub struct ConvertReply {
    #[serde(default)]
    pub success: bool,
    pub original: Option<String>,
    pub sketch: Option<String>,
    pub error: Option<String>,
}

/// JSON body for `POST /download-sketch`.
#[derive(Clone, Debug, Serialize)]
pub struct DownloadRequest {
    pub sketch_data: String,
}

/// JSON error body the service returns on failed requests.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorReply {
    pub error: Option<String>,
}

/// Human-readable byte count for display ("2.0 MB", "340.5 KB", "12 B").
pub fn human_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KIB * KIB {
        format!("{:.1} MB", b / (KIB * KIB))
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}
