//! App state - pure data structure with no I/O logic

use std::path::PathBuf;

use crate::constants::{CONVERT_BUSY_LABEL, CONVERT_LABEL};
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{CandidateFile, ImageRef, SketchPair};
use crate::notice::Notice;

/// Where the selection/conversion workflow currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FileSelected,
    Converting,
    ResultReady,
}

/// An in-flight conversion request, tagged with the selection it was issued
/// for so a late response after a re-select can be discarded.
#[derive(Clone, Copy, Debug)]
pub struct PendingConvert {
    pub request_id: u64,
    pub selection_seq: u64,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub phase: Phase,

    // Path input field
    pub input_mode: InputMode,
    pub path_input: String,
    pub cursor_position: usize,

    // Selection
    pub file: Option<CandidateFile>,
    /// Bumped on every select/remove; conversions carry the value they saw.
    pub selection_seq: u64,

    // Conversion
    pub result: Option<SketchPair>,
    pub original_payload_len: Option<usize>,
    pub sketch_payload_len: Option<usize>,
    pub result_seq: u64,
    pub pending_convert: Option<PendingConvert>,
    pub next_request_id: u64,

    // Download
    pub is_saving: bool,
    pub last_saved: Option<PathBuf>,

    // Error notice
    pub notice: Notice,

    // Popups
    pub show_help: bool,

    pub server_url: String,
}

impl AppState {
    pub fn new(server_url: String) -> Self {
        AppState {
            phase: Phase::Idle,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            cursor_position: 0,
            file: None,
            selection_seq: 0,
            result: None,
            original_payload_len: None,
            sketch_payload_len: None,
            result_seq: 0,
            pending_convert: None,
            next_request_id: 1,
            is_saving: false,
            last_saved: None,
            notice: Notice::new(),
            show_help: false,
            server_url,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_converting(&self) -> bool {
        matches!(self.phase, Phase::Converting)
    }

    /// The convert control is live iff a file is selected and nothing is in
    /// flight.
    pub fn can_convert(&self) -> bool {
        self.file.is_some() && !self.is_converting()
    }

    /// Phase for a state with no conversion in flight.
    pub(crate) fn settled_phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::ResultReady
        } else if self.file.is_some() {
            Phase::FileSelected
        } else {
            Phase::Idle
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            phase: self.phase,
            input_mode: self.input_mode,
            path_input: self.path_input.clone(),
            cursor_position: self.cursor_position,
            file_name: self.file.as_ref().map(|f| f.name.clone()),
            file_size: self.file.as_ref().map(|f| f.size_bytes()),
            convert_enabled: self.can_convert(),
            convert_label: if self.is_converting() {
                CONVERT_BUSY_LABEL
            } else {
                CONVERT_LABEL
            },
            download_enabled: self.result.is_some(),
            is_saving: self.is_saving,
            show_result: self.result.is_some(),
            original_summary: self
                .result
                .as_ref()
                .map(|r| describe_ref(&r.original, self.original_payload_len)),
            sketch_summary: self
                .result
                .as_ref()
                .map(|r| describe_ref(&r.sketch, self.sketch_payload_len)),
            result_seq: self.result_seq,
            last_saved: self.last_saved.clone(),
            notice: self.notice.message().map(String::from),
            show_help: self.show_help,
            server_url: self.server_url.clone(),
        }
    }
}

/// One-line display summary of an image reference.
fn describe_ref(image: &ImageRef, payload_len: Option<usize>) -> String {
    let kind = match image.data_uri_mime() {
        Some(mime) => format!("data URI ({})", mime),
        None => String::from("URL"),
    };
    match payload_len {
        Some(len) => format!("{}, {} decoded", kind, crate::models::human_size(len)),
        None => kind,
    }
}
