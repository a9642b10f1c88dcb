//! Render state - data structure sent from App layer to UI for rendering
//!
//! Every visual flag here is derived from the app state's phase when the
//! snapshot is built; the UI holds no flags of its own.

use std::path::PathBuf;

use crate::app::state::Phase;
use crate::constants::{CONVERT_LABEL, DEFAULT_SERVER_URL};
use crate::messages::ui_events::InputMode;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub phase: Phase,

    // Path input
    pub input_mode: InputMode,
    pub path_input: String,
    pub cursor_position: usize,

    // Selected file
    pub file_name: Option<String>,
    pub file_size: Option<usize>,

    // Controls
    pub convert_enabled: bool,
    pub convert_label: &'static str,
    pub download_enabled: bool,
    pub is_saving: bool,

    // Conversion result
    pub show_result: bool,
    pub original_summary: Option<String>,
    pub sketch_summary: Option<String>,
    /// Bumped whenever a new result lands; the UI focuses the result panel
    /// when it observes a change.
    pub result_seq: u64,
    pub last_saved: Option<PathBuf>,

    // Error notice
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,

    pub server_url: String,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            phase: Phase::Idle,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            cursor_position: 0,
            file_name: None,
            file_size: None,
            convert_enabled: false,
            convert_label: CONVERT_LABEL,
            download_enabled: false,
            is_saving: false,
            show_result: false,
            original_summary: None,
            sketch_summary: None,
            result_seq: 0,
            last_saved: None,
            notice: None,
            show_help: false,
            server_url: String::from(DEFAULT_SERVER_URL),
        }
    }
}
