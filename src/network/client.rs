//! HTTP client wrapper - executes conversion and download requests
//!
//! Every function here resolves to a [`NetworkResponse`]; no error leaves
//! this module in any other shape.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::constants::{CONVERT_PATH, DOWNLOAD_PATH, SKETCH_FILE_NAME};
use crate::messages::network::{FailureKind, NetworkResponse, Outcome};
use crate::models::{CandidateFile, ConvertReply, DownloadRequest, ErrorReply, ImageRef, SketchPair};

/// Upload a file to the conversion endpoint and interpret the reply.
pub async fn execute_convert(
    client: &reqwest::Client,
    base_url: &str,
    file: CandidateFile,
    id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let outcome = convert_outcome(client, base_url, file).await;
    NetworkResponse::ConvertDone {
        id,
        outcome,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

async fn convert_outcome(
    client: &reqwest::Client,
    base_url: &str,
    file: CandidateFile,
) -> Outcome<SketchPair> {
    let part = match reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.name)
        .mime_str(&file.mime_type)
    {
        Ok(part) => part,
        Err(e) => {
            return Outcome::failure(
                FailureKind::Unexpected,
                format!("Could not package the image: {}", e),
            )
        }
    };
    let form = reqwest::multipart::Form::new().part("image", part);

    let resp = match client
        .post(format!("{}{}", base_url, CONVERT_PATH))
        .multipart(form)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => return Outcome::failure(FailureKind::Transport, transport_message(&e)),
    };

    if !resp.status().is_success() {
        let (kind, message) = failure_from_response(resp, "Failed to convert image").await;
        return Outcome::Failure { kind, message };
    }

    match resp.json::<ConvertReply>().await {
        Ok(reply) => interpret_reply(reply),
        Err(e) => Outcome::failure(
            FailureKind::Unexpected,
            format!("Malformed reply from server: {}", e),
        ),
    }
}

/// A 2xx reply still carries its own success flag; trust it over the status.
fn interpret_reply(reply: ConvertReply) -> Outcome<SketchPair> {
    if !reply.success {
        return Outcome::failure(
            FailureKind::Application,
            reply.error.unwrap_or_else(|| String::from("Conversion failed")),
        );
    }
    match (reply.original, reply.sketch) {
        (Some(original), Some(sketch)) => Outcome::Success(SketchPair {
            original: ImageRef(original),
            sketch: ImageRef(sketch),
        }),
        _ => Outcome::failure(
            FailureKind::Unexpected,
            "Server reply was missing image data",
        ),
    }
}

/// Send the sketch reference back, receive the binary render, save it.
pub async fn execute_download(
    client: &reqwest::Client,
    base_url: &str,
    sketch_data: String,
    target_dir: &Path,
    id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let outcome = download_outcome(client, base_url, sketch_data, target_dir).await;
    NetworkResponse::DownloadDone {
        id,
        outcome,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

async fn download_outcome(
    client: &reqwest::Client,
    base_url: &str,
    sketch_data: String,
    target_dir: &Path,
) -> Outcome<PathBuf> {
    let resp = match client
        .post(format!("{}{}", base_url, DOWNLOAD_PATH))
        .json(&DownloadRequest { sketch_data })
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => return Outcome::failure(FailureKind::Transport, transport_message(&e)),
    };

    if !resp.status().is_success() {
        let (kind, message) = failure_from_response(resp, "Failed to download sketch").await;
        return Outcome::Failure { kind, message };
    }

    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Outcome::failure(FailureKind::Transport, format!("Error reading body: {}", e))
        }
    };

    match save_sketch(&bytes, target_dir) {
        Ok(path) => Outcome::Success(path),
        Err(e) => Outcome::failure(
            FailureKind::Unexpected,
            format!("Could not save sketch: {}", e),
        ),
    }
}

/// Write the payload through a temp file in the target directory, then move
/// it into place as `pencil_sketch.png`. A failed write never leaves a
/// partial file behind: the temp file's Drop removes it on every early exit.
fn save_sketch(bytes: &[u8], target_dir: &Path) -> std::io::Result<PathBuf> {
    let mut tmp = tempfile::NamedTempFile::new_in(target_dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let path = target_dir.join(SKETCH_FILE_NAME);
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

/// Turn a failed response into a failure kind and user-facing message,
/// preferring the server's own `{"error": ...}` body when it parses.
async fn failure_from_response(resp: reqwest::Response, fallback: &str) -> (FailureKind, String) {
    match resp.json::<ErrorReply>().await {
        Ok(ErrorReply { error: Some(message) }) if !message.is_empty() => {
            (FailureKind::Application, message)
        }
        _ => (FailureKind::Transport, fallback.to_string()),
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        String::from("Request timed out (30s)")
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
