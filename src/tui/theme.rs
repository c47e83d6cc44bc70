//! 主题模块
//!
//! 向导界面的统一配色与样式。

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

/// 界面常量
pub mod config {
    /// 列表选中项前缀
    pub const HIGHLIGHT_SYMBOL: &str = "▶ ";
    /// 步骤指示器中已完成步骤的符号
    pub const STEP_DONE: &str = "●";
    /// 步骤指示器中未到达步骤的符号
    pub const STEP_PENDING: &str = "○";
    /// 摘要表格标签列宽
    pub const SUMMARY_LABEL_WIDTH: u16 = 18;
}

/// 主题颜色配置
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 背景色
    pub bg: Color,
    /// 前景色
    pub fg: Color,
    /// 强调色
    pub accent: Color,
    /// 选中项背景色
    pub selected_bg: Color,
    /// 选中项前景色
    pub selected_fg: Color,
    /// 成功色
    pub success: Color,
    /// 警告色
    pub warning: Color,
    /// 错误色
    pub error: Color,
    /// 提示/次要文字色
    pub hint: Color,
    /// 边框色
    pub border: Color,
    /// 标题颜色
    pub title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        THEME
    }
}

impl Theme {
    /// 普通文本样式
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// 标题样式
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 选中项样式
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 强调样式（当前步骤等）
    pub fn accent(&self) -> Style {
        Style::new()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 边框样式
    pub fn border(&self) -> Style {
        Style::new().fg(self.border).bg(self.bg)
    }

    /// 提示文本样式
    pub fn hint(&self) -> Style {
        Style::new().fg(self.hint).bg(self.bg)
    }

    /// 成功样式
    pub fn success(&self) -> Style {
        Style::new().fg(self.success).bg(self.bg)
    }

    /// 警告样式
    pub fn warning(&self) -> Style {
        Style::new().fg(self.warning).bg(self.bg)
    }

    /// 错误样式
    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }

    /// 创建居中的标题行
    pub fn centered_title(&self, text: String) -> Line<'static> {
        Line::from(text).centered().style(self.title())
    }
}

/// 全局主题实例
pub static THEME: Theme = Theme {
    bg: Color::Black,
    fg: Color::White,
    accent: Color::Cyan,
    selected_bg: Color::Cyan,
    selected_fg: Color::Black,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    hint: Color::Gray,
    border: Color::Cyan,
    title: Color::Cyan,
};

/// 获取全局主题引用
pub fn theme() -> &'static Theme {
    &THEME
}
