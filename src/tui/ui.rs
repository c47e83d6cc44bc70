//! UI 渲染模块
//!
//! 设置背景并按当前屏幕分派渲染。

use crate::tui::screens;
use crate::tui::state::{AppState, Screen};
use crate::tui::theme::theme;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

/// 设置全局背景
fn set_background(area: Rect, buf: &mut Buffer) {
    let style = Style::new().bg(theme().bg);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position { x, y }) {
                cell.set_style(style);
            }
        }
    }
}

/// 渲染整个应用
pub fn render(terminal: &mut DefaultTerminal, state: &mut AppState) -> std::io::Result<()> {
    terminal.draw(|frame| draw(frame, frame.area(), state))?;
    Ok(())
}

/// 主渲染函数
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState) {
    set_background(area, frame.buffer_mut());

    match state.current_screen {
        Screen::Wizard => screens::wizard::draw(frame, area, state),
        Screen::Submitted => screens::submitted::draw(frame, area, state),
        Screen::Exit => screens::exit::draw(frame, area, state.wizard.is_submitted()),
    }
}
