//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Default base URL of the conversion service (Flask dev server default).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Path of the conversion endpoint.
pub const CONVERT_PATH: &str = "/convert";

/// Path of the sketch download endpoint.
pub const DOWNLOAD_PATH: &str = "/download-sketch";

/// Mime types the service accepts for upload.
pub const ACCEPTED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

/// Upload size cap, matching the server's MAX_CONTENT_LENGTH.
pub const MAX_FILE_BYTES: usize = 16 * 1024 * 1024;

/// File name used when saving a downloaded sketch.
pub const SKETCH_FILE_NAME: &str = "pencil_sketch.png";

/// How long an error notice stays on screen before auto-hiding.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Default label of the convert control.
pub const CONVERT_LABEL: &str = "Convert to Sketch";

/// Label of the convert control while a request is in flight.
pub const CONVERT_BUSY_LABEL: &str = "Converting...";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Sketchbooth";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
