//! # Sketchbooth
//!
//! A terminal client for a pencil-sketch image conversion service.
//!
//! ## Features
//! - Pick an image file by path, with client-side type/size validation
//! - Upload it for conversion (`POST /convert`, multipart)
//! - Track the returned original/sketch image references
//! - Save a binary render locally (`POST /download-sketch`)
//! - Transient, auto-expiring error notices
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod notice;
pub mod ui;
pub mod validate;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{CandidateFile, ImageRef, SketchPair};
pub use network::NetworkActor;
pub use notice::Notice;
pub use validate::{validate, ValidationError};
