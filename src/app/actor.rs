//! App actor - message loop processing UI events and network responses

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// How often the actor checks the notice deadline.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        server_url: String,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(server_url),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        let mut tick = tokio::time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = response.id(), "network response received");
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                _ = tick.tick() => {
                    if self.state.tick(Instant::now()) {
                        let _ = self.render_tx.send(self.state.to_render_state());
                    }
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Path input
            UiEvent::StartEditing => self.state.start_editing(),
            // SubmitPath is resolved by the UI adapter; if one slips through
            // it just closes the field.
            UiEvent::StopEditing | UiEvent::SubmitPath => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Selection
            UiEvent::FileChosen(file) => self.state.select(file),
            UiEvent::SelectionFailed(message) => self.state.selection_failed(message),
            UiEvent::RemoveFile => self.state.clear_selection(),

            // Actions
            UiEvent::Convert => {
                if let Some(cmd) = self.state.prepare_convert() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::Download => {
                if let Some(cmd) = self.state.prepare_download() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::DismissNotice => self.state.dismiss_notice(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
