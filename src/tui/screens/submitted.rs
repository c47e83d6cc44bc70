//! 提交完成渲染

use crate::record::Field;
use crate::tui::components::{render_hint, render_title_block, three_panel_layout, wrap_lines};
use crate::tui::labels::{field_label, gender_label};
use crate::tui::state::AppState;
use crate::tui::theme::{config::SUMMARY_LABEL_WIDTH, theme};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, BorderType, Cell, Paragraph, Row, Table},
};
use rust_i18n::t;

/// 渲染提交完成屏幕
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let [header, body, footer] = three_panel_layout(area);

    render_title_block(&t!("submitted_title"), frame, header);

    let [table_area, info_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(4)]).areas(body);

    let record = state.wizard.record();
    let value_width = table_area
        .width
        .saturating_sub(2 + SUMMARY_LABEL_WIDTH + 2)
        .max(1) as usize;

    let rows: Vec<Row> = state
        .wizard
        .steps()
        .iter()
        .flat_map(|step| step.fields.iter().copied())
        .map(|field| {
            let value = match field {
                Field::Gender => record
                    .gender
                    .map(|g| gender_label(g).to_string())
                    .unwrap_or_default(),
                _ => record.display_value(field),
            };
            let lines = wrap_lines(&value, value_width);
            let height = lines.len().max(1) as u16;
            Row::new(vec![
                Cell::from(field_label(field).to_string()).style(theme().hint()),
                Cell::from(lines),
            ])
            .height(height)
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(SUMMARY_LABEL_WIDTH), Constraint::Fill(1)],
    )
    .block(
        Block::bordered()
            .title(t!("submitted_record"))
            .border_type(BorderType::Rounded)
            .border_style(theme().border()),
    )
    .column_spacing(2)
    .style(theme().normal());
    frame.render_widget(table, table_area);

    let target = match &state.submission_target {
        Some(path) => t!("submitted_to_file", path = path.display()),
        None => t!("submitted_to_log"),
    };
    let mut info = vec![Line::from(target.to_string()).style(theme().success())];
    if let Some(log_path) = &state.log_path {
        info.push(
            Line::from(t!("submitted_log_path", path = log_path.display()).to_string())
                .style(theme().hint()),
        );
    }
    frame.render_widget(Paragraph::new(info), info_area);

    render_hint(&t!("hint_submitted"), frame, footer);
}
