//! 步骤表单状态
//!
//! 当前步骤的字段列表加上导航按钮行，以及文本输入模式。

use crate::record::Field;
use crate::steps::StepDefinition;
use crate::tui::state::InputState;

/// 表单中的一行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// 可编辑字段
    Field(Field),
    /// 上一步按钮（首个步骤不显示）
    Prev,
    /// 下一步 / 提交按钮
    Next,
}

/// 生成步骤的表单行
pub fn form_rows(step: &StepDefinition) -> Vec<FormRow> {
    let mut rows: Vec<FormRow> = step.fields.iter().copied().map(FormRow::Field).collect();
    if step.id > 1 {
        rows.push(FormRow::Prev);
    }
    rows.push(FormRow::Next);
    rows
}

/// 表单状态
#[derive(Debug, Default, Clone)]
pub struct FormState {
    /// 当前选中行
    pub selected: usize,
    /// 是否处于输入模式
    pub in_input_mode: bool,
    /// 输入缓冲
    pub input: InputState,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前选中行
    pub fn selected_row(&self, rows: &[FormRow]) -> Option<FormRow> {
        rows.get(self.selected).copied()
    }

    /// 选中字段（若当前行是字段）
    pub fn selected_field(&self, rows: &[FormRow]) -> Option<Field> {
        match self.selected_row(rows) {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }

    /// 下一行（循环）
    pub fn next_row(&mut self, row_count: usize) {
        if row_count > 0 {
            self.selected = (self.selected + 1) % row_count;
        }
    }

    /// 上一行（循环）
    pub fn prev_row(&mut self, row_count: usize) {
        self.selected = if self.selected == 0 {
            row_count.saturating_sub(1)
        } else {
            self.selected - 1
        };
    }

    /// 选中指定字段所在行
    pub fn focus_field(&mut self, rows: &[FormRow], field: Field) {
        if let Some(index) = rows.iter().position(|row| *row == FormRow::Field(field)) {
            self.selected = index;
        }
    }

    /// 进入输入模式
    pub fn enter_input_mode(&mut self, value: &str) {
        self.in_input_mode = true;
        self.input = InputState::with_value(value);
    }

    /// 退出输入模式，返回输入内容
    pub fn exit_input_mode(&mut self) -> String {
        self.in_input_mode = false;
        self.input.take()
    }

    /// 切换步骤后重置
    pub fn reset(&mut self) {
        self.selected = 0;
        self.in_input_mode = false;
        self.input.clear();
    }
}
