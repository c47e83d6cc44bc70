//! Common UI components module
//!
//! Layout helpers and small widgets shared by the screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{config, theme};

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, frame: &mut Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme().title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme().border())
        .style(theme().normal());

    frame.render_widget(block, area);
}

/// Render bottom hint text
pub fn render_hint(hint: &str, frame: &mut Frame, area: Rect) {
    let hint_widget = Paragraph::new(hint)
        .style(theme().hint())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// 步骤指示器：`● 1 标题  ● 2 标题  ○ 3 标题`
///
/// `current` 为 1-based，当前步骤高亮。
pub fn step_indicator(titles: &[String], current: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(titles.len() * 2);
    for (index, title) in titles.iter().enumerate() {
        let id = index + 1;
        let symbol = if id <= current {
            config::STEP_DONE
        } else {
            config::STEP_PENDING
        };
        let style = if id == current {
            theme().accent()
        } else {
            theme().hint()
        };
        if index > 0 {
            spans.push(Span::styled("  ", theme().hint()));
        }
        spans.push(Span::styled(format!("{} {} {}", symbol, id, title), style));
    }
    Line::from(spans).centered()
}

/// 按显示宽度截断文本，避免 UTF-8 边界问题
pub fn truncate_value(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut output = String::new();

    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        output.push(ch);
        current_width += ch_width;
    }

    output.push_str("...");
    output
}

/// 按显示宽度换行
pub fn wrap_lines(value: &str, max_width: usize) -> Vec<Line<'static>> {
    if max_width == 0 {
        return vec![Line::from(String::new())];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in value.chars() {
        if ch == '\n' {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
            continue;
        }

        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width && !current.is_empty() {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
        }

        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}

/// 列表内容宽度（去掉边框与高亮前缀）
pub fn list_content_width(area: Rect) -> usize {
    let inner_width = area.width.saturating_sub(2) as usize;
    let highlight_width = UnicodeWidthStr::width(config::HIGHLIGHT_SYMBOL);
    inner_width.saturating_sub(highlight_width).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate_value("short", 10), "short");
        assert_eq!(truncate_value("abcdefghij", 8), "abcde...");
        // 全角字符宽度为 2
        assert_eq!(truncate_value("驾驶员信息登记", 8), "驾驶...");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("abcdef", 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(wrap_lines("", 4).len(), 1);
        assert_eq!(wrap_lines("a\nb", 10).len(), 2);
    }

    #[test]
    fn test_step_indicator_has_one_span_per_step() {
        let titles = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let line = step_indicator(&titles, 2);
        // 3 个步骤 + 2 个分隔
        assert_eq!(line.spans.len(), 5);
        assert!(line.spans[2].content.starts_with(config::STEP_DONE));
        assert!(line.spans[4].content.starts_with(config::STEP_PENDING));
    }
}
