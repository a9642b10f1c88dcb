//! Sketchbooth - terminal client for a pencil-sketch conversion service
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

mod app;
mod constants;
mod messages;
mod models;
mod network;
mod notice;
mod ui;
mod validate;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::AppActor;
use messages::ui_events::{key_to_ui_event, InputMode};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use models::{human_size, load_candidate};
use network::NetworkActor;
use ui::{centered_rect, phase_color, phase_label, render_input};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional positional argument overrides the service base URL
    let server_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from(constants::DEFAULT_SERVER_URL));

    // Initialize logging to file (the TUI owns the terminal)
    let file_appender = tracing_appender::rolling::never(".", "sketchbooth.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Downloaded sketches land in the user's download directory
    let save_dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));

    // Spawn network actor
    let network_actor = NetworkActor::new(server_url.clone(), save_dir, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(server_url, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    // Result panel stays highlighted from the moment a result lands until
    // the next key press, standing in for scroll-into-view.
    let mut seen_result_seq = 0u64;

    loop {
        let result_is_new = current_state.result_seq > seen_result_seq;
        terminal.draw(|f| draw_ui(f, &current_state, result_is_new))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                seen_result_seq = current_state.result_seq;
                if let Some(ui_event) =
                    key_to_ui_event(key, current_state.input_mode, current_state.show_help)
                {
                    match ui_event {
                        UiEvent::Quit => {
                            let _ = ui_tx.send(UiEvent::Quit);
                            break;
                        }
                        // The adapter resolves the typed path into plain file
                        // data before the app layer sees it.
                        UiEvent::SubmitPath => {
                            let _ = ui_tx.send(UiEvent::StopEditing);
                            let path = current_state.path_input.trim().to_string();
                            if !path.is_empty() {
                                let _ = ui_tx.send(choose_file(Path::new(&path)));
                            }
                        }
                        other => {
                            let _ = ui_tx.send(other);
                        }
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

/// Read a path into a selection event, turning read failures into an error
/// the notice layer can show.
fn choose_file(path: &Path) -> UiEvent {
    match load_candidate(path) {
        Ok(file) => UiEvent::FileChosen(file),
        Err(e) => UiEvent::SelectionFailed(format!("{:#}", e)),
    }
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, result_is_new: bool) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Image path input
            Constraint::Length(3), // File info + controls
            Constraint::Min(6),    // Result
            Constraint::Length(1), // Error notice
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);
    draw_path_input(f, state, chunks[1]);
    draw_controls(f, state, chunks[2]);
    draw_result(f, state, result_is_new, chunks[3]);
    draw_notice(f, state, chunks[4]);
    draw_hints(f, state, chunks[5]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Sketchbooth ",
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(&state.server_url, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", phase_label(state.phase)),
            Style::default().fg(phase_color(state.phase)),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_path_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = state.input_mode == InputMode::Editing;
    let title = if editing {
        " Image path (Enter to select, Esc to cancel) "
    } else {
        " Image path (e to edit) "
    };
    f.render_widget(render_input(&state.path_input, title, editing), area);

    if editing {
        // Cursor sits after the byte offset kept by the app layer.
        let visible = state.path_input[..state.cursor_position].chars().count() as u16;
        f.set_cursor_position((area.x + visible + 1, area.y + 1));
    }
}

fn draw_controls(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = Vec::new();

    match (&state.file_name, state.file_size) {
        (Some(name), Some(size)) => {
            spans.push(Span::styled(
                format!(" {} ({}) ", name, human_size(size)),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled(" x:remove ", Style::default().fg(Color::DarkGray)));
        }
        _ => {
            spans.push(Span::styled(
                " no file selected ",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    spans.push(Span::raw("  "));
    let convert_style = if state.convert_enabled {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!(" c:{} ", state.convert_label), convert_style));

    spans.push(Span::raw("  "));
    let download_label = if state.is_saving { "d:Saving..." } else { "d:Download" };
    let download_style = if state.download_enabled {
        Style::default().fg(Color::Black).bg(Color::Blue).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!(" {} ", download_label), download_style));

    let block = Block::default().borders(Borders::ALL).title(" Controls ");
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_result(f: &mut Frame, state: &RenderState, result_is_new: bool, area: Rect) {
    let border_style = if result_is_new {
        Style::default().fg(Color::Yellow)
    } else if state.show_result {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Result ");

    let mut lines: Vec<Line> = Vec::new();
    if state.show_result {
        if let Some(summary) = &state.original_summary {
            lines.push(Line::from(vec![
                Span::styled("original: ", Style::default().fg(Color::Cyan)),
                Span::raw(summary.clone()),
            ]));
        }
        if let Some(summary) = &state.sketch_summary {
            lines.push(Line::from(vec![
                Span::styled("sketch:   ", Style::default().fg(Color::Green)),
                Span::raw(summary.clone()),
            ]));
        }
        lines.push(Line::raw(""));
        match &state.last_saved {
            Some(path) => lines.push(Line::from(Span::styled(
                format!("saved to {}", path.display()),
                Style::default().fg(Color::Green),
            ))),
            None => lines.push(Line::from(Span::styled(
                "press d to download the sketch",
                Style::default().fg(Color::DarkGray),
            ))),
        }
    } else {
        lines.push(Line::from(Span::styled(
            "convert an image to see the result here",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_notice(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(message) = &state.notice {
        let line = Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
        f.render_widget(Paragraph::new(line), area);
    }
}

fn draw_hints(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = match state.input_mode {
        InputMode::Editing => " Enter select | Esc cancel ",
        InputMode::Normal => " e edit path | c convert | d download | x remove | ? help | q quit ",
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::raw(""),
        Line::raw("  e / Enter   edit the image path"),
        Line::raw("  Enter       (while editing) select the file"),
        Line::raw("  x           remove the selected file"),
        Line::raw("  c / s       convert to pencil sketch"),
        Line::raw("  d           download the sketch as pencil_sketch.png"),
        Line::raw("  Esc         dismiss the error message"),
        Line::raw("  ?           toggle this help"),
        Line::raw("  q / Ctrl-c  quit"),
        Line::raw(""),
        Line::raw("  Accepted images: JPEG, PNG, GIF, BMP, WebP up to 16MB."),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Help (any key to close) ");
    f.render_widget(Paragraph::new(text).block(block), popup);
}
