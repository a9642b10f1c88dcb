//! Command handlers - business logic for processing UI events
//!
//! Selection lifecycle, conversion and download orchestration, and notice
//! management. Everything here is synchronous; suspension happens only in
//! the network layer.

use std::time::Instant;

use crate::app::state::{AppState, PendingConvert, Phase};
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, Outcome};
use crate::models::CandidateFile;
use crate::validate::validate;

impl AppState {
    // ========================
    // Path input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.path_input.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.path_input.len() {
            self.path_input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.path_input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.path_input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.path_input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.path_input.len() {
            self.cursor_position = self.path_input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.path_input.len());
        }
    }

    // ========================
    // Selection
    // ========================

    /// Offer a candidate file. Rejection leaves the current selection (and
    /// any result) untouched; acceptance replaces the selection and drops
    /// the previous result and notice.
    pub fn select(&mut self, file: CandidateFile) {
        if let Err(reason) = validate(&file) {
            tracing::info!(name = %file.name, mime = %file.mime_type, size = file.size_bytes(), %reason, "rejected candidate file");
            self.notice.show(reason.to_string());
            return;
        }

        tracing::info!(name = %file.name, size = file.size_bytes(), "file selected");
        self.file = Some(file);
        self.selection_seq += 1;
        self.drop_result();
        self.notice.hide();
        if !self.is_converting() {
            self.phase = Phase::FileSelected;
        }
    }

    /// The UI adapter could not produce a candidate (unreadable path).
    pub fn selection_failed(&mut self, message: String) {
        self.notice.show(message);
    }

    /// Remove the selection. Idempotent; callable in any phase.
    pub fn clear_selection(&mut self) {
        self.file = None;
        self.selection_seq += 1;
        self.drop_result();
        self.notice.hide();
        if !self.is_converting() {
            self.phase = Phase::Idle;
        }
    }

    fn drop_result(&mut self) {
        self.result = None;
        self.original_payload_len = None;
        self.sketch_payload_len = None;
        self.last_saved = None;
    }

    // ========================
    // Conversion
    // ========================

    /// Start a conversion for the current selection.
    ///
    /// Returns `None` without side effects while one is already in flight
    /// (the UI keeps the control disabled for that window too), and `None`
    /// plus a notice when nothing is selected.
    pub fn prepare_convert(&mut self) -> Option<NetworkCommand> {
        if self.is_converting() {
            return None;
        }
        let file = match &self.file {
            Some(file) => file.clone(),
            None => {
                self.notice.show("Please select an image first");
                return None;
            }
        };

        self.notice.hide();
        let id = self.next_id();
        self.pending_convert = Some(PendingConvert {
            request_id: id,
            selection_seq: self.selection_seq,
        });
        self.phase = Phase::Converting;

        Some(NetworkCommand::Convert { id, file })
    }

    // ========================
    // Download
    // ========================

    /// Request a binary render of the current sketch. No single-flight
    /// restriction: may repeat, and may overlap a running conversion.
    pub fn prepare_download(&mut self) -> Option<NetworkCommand> {
        let sketch_data = match &self.result {
            Some(result) => result.sketch.as_str().to_string(),
            None => {
                self.notice.show("No sketch available to download");
                return None;
            }
        };

        let id = self.next_id();
        self.is_saving = true;
        Some(NetworkCommand::Download { id, sketch_data })
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::ConvertDone { id, outcome, time_ms } => {
                self.finish_convert(id, outcome, time_ms)
            }
            NetworkResponse::DownloadDone { id, outcome, time_ms } => {
                self.finish_download(id, outcome, time_ms)
            }
        }
    }

    fn finish_convert(
        &mut self,
        id: u64,
        outcome: Outcome<crate::models::SketchPair>,
        time_ms: u64,
    ) {
        let pending = match self.pending_convert.take() {
            Some(p) if p.request_id == id => p,
            other => {
                self.pending_convert = other;
                tracing::debug!(id, "ignoring convert response with no matching pending request");
                return;
            }
        };

        // The request is settled either way: the control comes back.
        if pending.selection_seq != self.selection_seq {
            tracing::info!(id, "discarding late convert response, selection changed while in flight");
            self.phase = self.settled_phase();
            return;
        }

        match outcome {
            Outcome::Success(pair) => {
                tracing::info!(id, time_ms, "conversion succeeded");
                self.original_payload_len = pair.original.payload_len();
                self.sketch_payload_len = pair.sketch.payload_len();
                self.result = Some(pair);
                self.result_seq += 1;
                self.last_saved = None;
                self.phase = Phase::ResultReady;
            }
            Outcome::Failure { kind, message } => {
                tracing::warn!(id, time_ms, ?kind, %message, "conversion failed");
                self.notice.show(message);
                // A previous result, if any, stays as it was.
                self.phase = self.settled_phase();
            }
        }
    }

    fn finish_download(&mut self, id: u64, outcome: Outcome<std::path::PathBuf>, time_ms: u64) {
        self.is_saving = false;
        match outcome {
            Outcome::Success(path) => {
                tracing::info!(id, time_ms, path = %path.display(), "sketch saved");
                self.last_saved = Some(path);
            }
            Outcome::Failure { kind, message } => {
                tracing::warn!(id, time_ms, ?kind, %message, "download failed");
                self.notice.show(message);
            }
        }
    }

    // ========================
    // Notice / popups
    // ========================

    /// Clear an expired notice. Returns true if the screen needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notice.expire(now)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.hide();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONVERT_BUSY_LABEL, CONVERT_LABEL, MAX_FILE_BYTES};
    use crate::messages::FailureKind;
    use crate::models::{ImageRef, SketchPair};
    use std::path::PathBuf;

    fn state() -> AppState {
        AppState::new("http://localhost:5000".to_string())
    }

    fn png(name: &str, size: usize) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0u8; size],
        }
    }

    fn pair(sketch: &str) -> SketchPair {
        SketchPair {
            original: ImageRef("data:image/png;base64,b3JpZw==".to_string()),
            sketch: ImageRef(sketch.to_string()),
        }
    }

    fn convert_done(id: u64, outcome: Outcome<SketchPair>) -> NetworkResponse {
        NetworkResponse::ConvertDone {
            id,
            outcome,
            time_ms: 7,
        }
    }

    /// Drive a full successful conversion, returning the request id used.
    fn converted(state: &mut AppState, sketch: &str) -> u64 {
        let cmd = state.prepare_convert().expect("convert should start");
        let id = match cmd {
            NetworkCommand::Convert { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };
        state.handle_response(convert_done(id, Outcome::Success(pair(sketch))));
        id
    }

    #[test]
    fn test_select_valid_file() {
        let mut s = state();
        s.select(png("photo.png", 2 * 1024 * 1024));

        assert_eq!(s.phase, Phase::FileSelected);
        assert_eq!(s.file.as_ref().unwrap().name, "photo.png");
        assert!(s.can_convert());
        assert_eq!(s.notice.message(), None);
    }

    #[test]
    fn test_select_invalid_type_is_rejected_synchronously() {
        let mut s = state();
        s.select(CandidateFile {
            name: "doc.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: vec![0u8; 100],
        });

        assert_eq!(s.phase, Phase::Idle);
        assert!(s.file.is_none());
        assert_eq!(
            s.notice.message(),
            Some("Please select a valid image file (JPEG, PNG, GIF, BMP, or WebP)")
        );
        // Nothing to send: convert refuses too.
        assert!(s.prepare_convert().is_none());
    }

    #[test]
    fn test_select_oversized_file_is_rejected() {
        let mut s = state();
        s.select(png("huge.jpg", MAX_FILE_BYTES + 1));

        assert!(s.file.is_none());
        assert_eq!(s.notice.message(), Some("File size must be less than 16MB"));
    }

    #[test]
    fn test_selecting_new_file_clears_previous_result() {
        let mut s = state();
        s.select(png("first.png", 1024));
        converted(&mut s, "data:image/png;base64,QQ==");
        assert!(s.result.is_some());

        s.select(png("second.png", 1024));
        assert!(s.result.is_none());
        assert!(!s.to_render_state().show_result);
        assert_eq!(s.phase, Phase::FileSelected);
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        s.clear_selection();
        s.clear_selection();

        assert_eq!(s.phase, Phase::Idle);
        assert!(s.file.is_none());
        assert_eq!(s.notice.message(), None);
    }

    #[test]
    fn test_convert_without_file_shows_error_and_sends_nothing() {
        let mut s = state();
        assert!(s.prepare_convert().is_none());
        assert_eq!(s.notice.message(), Some("Please select an image first"));
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn test_convert_is_single_flight() {
        let mut s = state();
        s.select(png("photo.png", 1024));

        assert!(s.prepare_convert().is_some());
        assert_eq!(s.phase, Phase::Converting);
        assert!(!s.can_convert());
        // Second trigger while in flight: no command, no state change.
        assert!(s.prepare_convert().is_none());
        assert_eq!(s.notice.message(), None);
    }

    #[test]
    fn test_convert_success_path() {
        let mut s = state();
        s.select(png("photo.png", 2 * 1024 * 1024));
        converted(&mut s, "data:image/png;base64,QQ==");

        assert_eq!(s.phase, Phase::ResultReady);
        assert_eq!(
            s.result.as_ref().unwrap().sketch.as_str(),
            "data:image/png;base64,QQ=="
        );
        let render = s.to_render_state();
        assert!(render.show_result);
        assert!(render.download_enabled);
        assert!(render.convert_enabled);
        assert_eq!(render.convert_label, CONVERT_LABEL);
        assert_eq!(render.result_seq, 1);
    }

    #[test]
    fn test_convert_label_while_in_flight() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        s.prepare_convert();

        let render = s.to_render_state();
        assert_eq!(render.convert_label, CONVERT_BUSY_LABEL);
        assert!(!render.convert_enabled);
    }

    #[test]
    fn test_convert_failure_surfaces_server_message() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        let id = match s.prepare_convert().unwrap() {
            NetworkCommand::Convert { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };

        s.handle_response(convert_done(
            id,
            Outcome::failure(FailureKind::Application, "decoder failure"),
        ));

        assert_eq!(s.notice.message(), Some("decoder failure"));
        assert!(s.result.is_none());
        // Control back to its enabled, default-labeled state.
        let render = s.to_render_state();
        assert!(render.convert_enabled);
        assert_eq!(render.convert_label, CONVERT_LABEL);
        assert_eq!(s.phase, Phase::FileSelected);
    }

    #[test]
    fn test_convert_failure_keeps_previous_result() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        converted(&mut s, "data:image/png;base64,QQ==");

        // Re-convert the same selection, this time it fails.
        let id = match s.prepare_convert().unwrap() {
            NetworkCommand::Convert { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };
        s.handle_response(convert_done(
            id,
            Outcome::failure(FailureKind::Transport, "Connection failed: refused"),
        ));

        assert_eq!(
            s.result.as_ref().unwrap().sketch.as_str(),
            "data:image/png;base64,QQ=="
        );
        assert_eq!(s.phase, Phase::ResultReady);
        assert_eq!(s.notice.message(), Some("Connection failed: refused"));
    }

    #[test]
    fn test_late_response_after_reselect_is_discarded() {
        let mut s = state();
        s.select(png("first.png", 1024));
        let id = match s.prepare_convert().unwrap() {
            NetworkCommand::Convert { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };

        // New file chosen while the first request is still in flight.
        s.select(png("second.png", 1024));
        assert_eq!(s.phase, Phase::Converting);

        s.handle_response(convert_done(
            id,
            Outcome::Success(pair("data:image/png;base64,U1RBTEU=")),
        ));

        // Payload dropped, control settled for the new selection.
        assert!(s.result.is_none());
        assert_eq!(s.phase, Phase::FileSelected);
        assert!(s.can_convert());
        assert_eq!(s.notice.message(), None);
    }

    #[test]
    fn test_response_with_unknown_id_is_ignored() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        s.prepare_convert();

        s.handle_response(convert_done(999, Outcome::Success(pair("data:x"))));

        assert_eq!(s.phase, Phase::Converting);
        assert!(s.result.is_none());
        assert!(s.pending_convert.is_some());
    }

    #[test]
    fn test_download_without_result() {
        let mut s = state();
        assert!(s.prepare_download().is_none());
        assert_eq!(s.notice.message(), Some("No sketch available to download"));
        assert!(!s.is_saving);
    }

    #[test]
    fn test_download_sends_current_sketch_reference() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        converted(&mut s, "data:image/png;base64,QQ==");

        match s.prepare_download() {
            Some(NetworkCommand::Download { sketch_data, .. }) => {
                assert_eq!(sketch_data, "data:image/png;base64,QQ==");
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(s.is_saving);

        // Repeatable without re-running conversion.
        assert!(s.prepare_download().is_some());
    }

    #[test]
    fn test_download_success_records_saved_path() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        converted(&mut s, "data:image/png;base64,QQ==");
        let id = match s.prepare_download().unwrap() {
            NetworkCommand::Download { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };

        let path = PathBuf::from("/tmp/pencil_sketch.png");
        s.handle_response(NetworkResponse::DownloadDone {
            id,
            outcome: Outcome::Success(path.clone()),
            time_ms: 3,
        });

        assert!(!s.is_saving);
        assert_eq!(s.last_saved, Some(path));
        assert_eq!(s.notice.message(), None);
    }

    #[test]
    fn test_download_failure_surfaces_message() {
        let mut s = state();
        s.select(png("photo.png", 1024));
        converted(&mut s, "data:image/png;base64,QQ==");
        let id = match s.prepare_download().unwrap() {
            NetworkCommand::Download { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };

        s.handle_response(NetworkResponse::DownloadDone {
            id,
            outcome: Outcome::failure(FailureKind::Application, "No sketch data provided"),
            time_ms: 3,
        });

        assert!(!s.is_saving);
        assert_eq!(s.notice.message(), Some("No sketch data provided"));
        // The result itself is still available for another try.
        assert!(s.result.is_some());
    }

    #[test]
    fn test_path_input_editing() {
        let mut s = state();
        s.start_editing();
        for c in "photo.png".chars() {
            s.enter_char(c);
        }
        assert_eq!(s.path_input, "photo.png");

        s.delete_char();
        s.delete_char();
        s.delete_char();
        assert_eq!(s.path_input, "photo.");

        s.move_cursor_left();
        s.move_cursor_left();
        s.enter_char('X');
        assert_eq!(s.path_input, "photXo.");

        s.stop_editing();
        assert_eq!(s.input_mode, InputMode::Normal);
    }
}
