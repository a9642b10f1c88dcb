//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::models::{CandidateFile, SketchPair};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Upload the selected file for conversion
    Convert { id: u64, file: CandidateFile },
    /// Request a binary render of the sketch and save it locally
    Download { id: u64, sketch_data: String },
    /// Shutdown the network actor
    Shutdown,
}

/// Failure classes surfaced to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Network-level failure, or a non-2xx status without a usable error body
    Transport,
    /// The service replied with an explicit error message
    Application,
    /// Anything else: malformed reply body, local I/O while saving
    Unexpected,
}

/// Result of an asynchronous operation.
///
/// Every network task resolves to one of these; errors never propagate past
/// the network layer in any other form.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    Failure { kind: FailureKind, message: String },
}

impl<T> Outcome<T> {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            message: message.into(),
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A conversion request resolved
    ConvertDone {
        id: u64,
        outcome: Outcome<SketchPair>,
        time_ms: u64,
    },
    /// A download request resolved; success carries the saved path
    DownloadDone {
        id: u64,
        outcome: Outcome<PathBuf>,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::ConvertDone { id, .. } => *id,
            NetworkResponse::DownloadDone { id, .. } => *id,
        }
    }
}
