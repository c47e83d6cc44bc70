//! Event handling module
//!
//! Maps crossterm terminal events onto the keys the wizard reacts to.

use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
};
use std::time::Duration;

/// Event poll interval (milliseconds)
const TICK_RATE: u64 = 50;

/// Event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Tab: next step
    Tab,
    /// Shift+Tab: previous step
    BackTab,
    Backspace,
    Delete,
    Home,
    End,
    /// Character input
    Char(char),
    /// Bracketed paste (e.g. a dropped image path)
    Paste(String),
    /// Ctrl+C / Ctrl+D exit
    CtrlC,
    /// Window resize
    Resize(u16, u16),
    /// No event (timeout)
    None,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => key_event.into(),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            Event::Paste(text) => TuiEvent::Paste(text),
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost => TuiEvent::None,
        }
    }
}

impl From<KeyEvent> for TuiEvent {
    fn from(key: KeyEvent) -> Self {
        // Ignore non-press events
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return TuiEvent::CtrlC;
        }

        match key.code {
            KeyCode::Esc => TuiEvent::Escape,
            KeyCode::Enter => TuiEvent::Enter,
            KeyCode::Up => TuiEvent::Up,
            KeyCode::Down => TuiEvent::Down,
            KeyCode::Left => TuiEvent::Left,
            KeyCode::Right => TuiEvent::Right,
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => TuiEvent::BackTab,
            KeyCode::Tab | KeyCode::PageDown => TuiEvent::Tab,
            KeyCode::BackTab | KeyCode::PageUp => TuiEvent::BackTab,
            KeyCode::Backspace => TuiEvent::Backspace,
            KeyCode::Delete => TuiEvent::Delete,
            KeyCode::Home => TuiEvent::Home,
            KeyCode::End => TuiEvent::End,
            KeyCode::Char(c) => TuiEvent::Char(c),
            _ => TuiEvent::None,
        }
    }
}

/// Event poller
#[derive(Debug)]
pub struct EventPoll {
    tick_rate: Duration,
}

impl EventPoll {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll next event, `TuiEvent::None` on timeout
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            Ok(event::read()?.into())
        } else {
            Ok(TuiEvent::None)
        }
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE))
    }
}

/// Enable bracketed paste mode
pub fn enable_bracketed_paste() -> std::io::Result<()> {
    std::io::stdout().execute(EnableBracketedPaste)?;
    Ok(())
}

/// Disable bracketed paste mode
pub fn disable_bracketed_paste() -> std::io::Result<()> {
    std::io::stdout().execute(DisableBracketedPaste)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(TuiEvent::from(tab), TuiEvent::Tab);

        let shift_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(TuiEvent::from(shift_tab), TuiEvent::BackTab);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(TuiEvent::from(ctrl_c), TuiEvent::CtrlC);

        let digit = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(TuiEvent::from(digit), TuiEvent::Char('2'));
    }

    #[test]
    fn test_paste_is_forwarded() {
        let event = Event::Paste("/tmp/avatar.png".to_string());
        assert_eq!(
            TuiEvent::from(event),
            TuiEvent::Paste("/tmp/avatar.png".to_string())
        );
    }
}
