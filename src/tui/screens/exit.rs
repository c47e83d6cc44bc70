//! 退出确认渲染

use crate::tui::components::three_panel_layout;
use crate::tui::theme::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use rust_i18n::t;

/// 渲染退出确认
pub fn draw(frame: &mut Frame, area: Rect, submitted: bool) {
    let [_, body, _] = three_panel_layout(area);

    let text = if submitted {
        t!("exit_confirm")
    } else {
        t!("exit_confirm_unsaved")
    };

    let confirm_text = Paragraph::new(text)
        .style(theme().warning())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme().border()),
        );
    frame.render_widget(confirm_text, body);
}
