//! TUI application main module
//!
//! Owns the terminal and drives the event loop; all wizard logic lives in
//! [`AppState`].

use crate::tui::event::{self, EventPoll, TuiEvent};
use crate::tui::state::{AppState, TuiResult, TuiWizard};
use crate::tui::ui::render;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use tracing::info;

/// TUI application
#[derive(Debug)]
pub struct TuiApp {
    /// Terminal
    pub terminal: DefaultTerminal,
    /// Event poller
    pub event_poll: EventPoll,
    /// Application state
    pub state: AppState,
}

impl TuiApp {
    /// Take over the terminal
    pub fn new(wizard: TuiWizard) -> std::io::Result<Self> {
        let terminal = ratatui::init();
        event::enable_bracketed_paste()?;

        Ok(Self {
            terminal,
            event_poll: EventPoll::default(),
            state: AppState::new(wizard),
        })
    }

    /// Set log path shown after submission
    pub fn set_log_path(&mut self, path: PathBuf) {
        self.state.log_path = Some(path);
    }

    /// Set the file the record is written to
    pub fn set_submission_target(&mut self, path: Option<PathBuf>) {
        self.state.submission_target = path;
    }

    /// Run the event loop until the user leaves
    pub fn run(&mut self) -> std::io::Result<TuiResult> {
        let outcome = self.event_loop();

        let _ = event::disable_bracketed_paste();
        ratatui::restore();

        outcome?;
        let result = self.state.result();
        info!(submitted = result.submitted, "Interactive session ended");
        Ok(result)
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        render(&mut self.terminal, &mut self.state)?;

        loop {
            match self.event_poll.next()? {
                TuiEvent::None => continue,
                TuiEvent::Resize(_, _) => {}
                TuiEvent::CtrlC => self.state.request_exit(),
                event => {
                    if self.state.handle_event(event) {
                        return Ok(());
                    }
                }
            }
            render(&mut self.terminal, &mut self.state)?;
        }
    }
}
