//! 分步表单渲染
//!
//! 标题、步骤指示器、当前步骤的字段（含错误提示）、导航按钮与状态栏。

use crate::record::Field;
use crate::tui::components::{
    list_content_width, render_hint, render_title_block, step_indicator, truncate_value,
};
use crate::tui::labels::{field_label, gender_label};
use crate::tui::state::{AppState, FormRow, MessageKind};
use crate::tui::theme::{config::HIGHLIGHT_SYMBOL, theme};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, Paragraph},
};
use rust_i18n::t;
use std::borrow::Cow;

/// 渲染分步表单
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let [header, steps, description, body, status, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(area);

    render_title_block(&t!("app_title"), frame, header);

    let titles: Vec<String> = state.wizard.steps().iter().map(|s| s.title()).collect();
    frame.render_widget(
        Paragraph::new(step_indicator(&titles, state.wizard.current_step())),
        steps,
    );

    let step = state.wizard.step();
    let progress = t!(
        "step_progress",
        current = state.wizard.current_step(),
        total = state.wizard.step_count()
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{}  ", progress), theme().hint()),
            Span::styled(step.description(), theme().normal()),
        ]))
        .centered(),
        description,
    );

    draw_form(frame, body, state);
    draw_status(frame, status, state);

    render_hint(&hint_text(state), frame, footer);
}

fn draw_form(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let rows = state.rows();
    let selected = state.form.selected.min(rows.len().saturating_sub(1));
    let content_width = list_content_width(area);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let is_selected = index == selected;
            match row {
                FormRow::Field(field) => field_item(state, *field, is_selected, content_width),
                FormRow::Prev => button_item(t!("button_prev"), is_selected),
                FormRow::Next => {
                    let label = if state.wizard.is_last_step() {
                        t!("button_submit")
                    } else {
                        t!("button_next")
                    };
                    button_item(label, is_selected)
                }
            }
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(state.wizard.step().title())
                .border_type(BorderType::Rounded)
                .border_style(theme().border()),
        )
        .highlight_style(theme().selected())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    state.list_state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn field_item(
    state: &AppState,
    field: Field,
    is_selected: bool,
    content_width: usize,
) -> ListItem<'static> {
    let label = field_label(field);
    let editing = is_selected && state.form.in_input_mode;

    let value_line = if editing {
        let (left, right) = state.form.input.split_at_cursor();
        Line::from(vec![
            Span::raw(format!("{}: ", label)),
            Span::styled(
                format!("[{}|{}]", left, right),
                Style::new().add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        let value = display_value(state, field);
        let value_span = if value.is_empty() {
            Span::styled(t!("value_empty").to_string(), theme().hint())
        } else {
            let budget = content_width.saturating_sub(label.chars().count() + 2);
            Span::raw(truncate_value(&value, budget))
        };
        Line::from(vec![Span::raw(format!("{}: ", label)), value_span])
    };

    let mut lines = vec![value_line];
    if let Some(message) = state.wizard.errors().message(field) {
        lines.push(Line::from(Span::styled(
            format!("  ✗ {}", message),
            theme().error(),
        )));
    }

    let style = if is_selected {
        theme().selected()
    } else {
        theme().normal()
    };
    ListItem::new(lines).style(style)
}

fn button_item(label: Cow<'static, str>, is_selected: bool) -> ListItem<'static> {
    let style = if is_selected {
        theme().selected().add_modifier(Modifier::BOLD)
    } else {
        theme().accent()
    };
    ListItem::new(Line::from(label.to_string())).style(style)
}

fn display_value(state: &AppState, field: Field) -> String {
    let record = state.wizard.record();
    match field {
        Field::Gender => record
            .gender
            .map(|g| gender_label(g).to_string())
            .unwrap_or_default(),
        Field::File => record
            .file
            .as_ref()
            .map(|image| format!("{} ({} B)", image.file_name, image.size))
            .unwrap_or_default(),
        _ => record.display_value(field),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(message) = &state.message else {
        return;
    };
    let style = match message.kind {
        MessageKind::Info => theme().hint(),
        MessageKind::Success => theme().success(),
        MessageKind::Warning => theme().warning(),
        MessageKind::Error => theme().error(),
    };
    frame.render_widget(Paragraph::new(message.text.as_str()).style(style).centered(), area);
}

fn hint_text(state: &AppState) -> Cow<'static, str> {
    if state.form.in_input_mode {
        return t!("hint_input");
    }
    let rows = state.rows();
    match state.form.selected_field(&rows) {
        Some(Field::Gender) => t!("hint_gender"),
        Some(Field::File) => t!("hint_file"),
        Some(_) => t!("hint_field"),
        None => t!("hint_button"),
    }
}
