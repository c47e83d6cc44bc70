//! 应用状态
//!
//! 持有向导控制器与界面状态，并把按键翻译为向导操作。渲染层只读取
//! 这里的快照。

use crate::error::Error;
use crate::record::{Field, FieldValue, Gender, OnboardingRecord};
use crate::submit::SubmissionSink;
use crate::tui::event::TuiEvent;
use crate::tui::labels::transition_message;
use crate::tui::state::{FormRow, FormState, form_rows};
use crate::wizard::{StepWizard, Transition};
use ratatui::widgets::ListState;
use rust_i18n::t;
use std::path::PathBuf;
use tracing::{debug, error};

/// 终端界面使用的向导类型
pub type TuiWizard = StepWizard<Box<dyn SubmissionSink>>;

/// 屏幕枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// 分步表单
    #[default]
    Wizard,
    /// 提交完成
    Submitted,
    /// 退出确认
    Exit,
}

/// 状态栏消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// 状态栏消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// TUI 运行结果
#[derive(Debug, Clone)]
pub struct TuiResult {
    /// 会话结束时的记录
    pub record: OnboardingRecord,
    /// 是否已提交
    pub submitted: bool,
}

/// 应用状态（包含 UI 状态）
#[derive(Debug)]
pub struct AppState {
    /// 当前屏幕
    pub current_screen: Screen,
    /// 进入退出确认前的屏幕
    pub previous_screen: Screen,
    /// 向导控制器
    pub wizard: TuiWizard,
    /// 表单状态
    pub form: FormState,
    /// 状态栏消息
    pub message: Option<StatusMessage>,
    /// 字段列表状态
    pub list_state: ListState,
    /// 日志文件路径
    pub log_path: Option<PathBuf>,
    /// 提交文件路径（未设置时写入日志）
    pub submission_target: Option<PathBuf>,
}

impl AppState {
    pub fn new(wizard: TuiWizard) -> Self {
        Self {
            current_screen: Screen::Wizard,
            previous_screen: Screen::Wizard,
            wizard,
            form: FormState::new(),
            message: None,
            list_state: ListState::default().with_selected(Some(0)),
            log_path: None,
            submission_target: None,
        }
    }

    /// 当前步骤的表单行
    pub fn rows(&self) -> Vec<FormRow> {
        form_rows(self.wizard.step())
    }

    /// 运行结果快照
    pub fn result(&self) -> TuiResult {
        TuiResult {
            record: self.wizard.record().clone(),
            submitted: self.wizard.is_submitted(),
        }
    }

    /// 处理事件，返回 `true` 表示退出程序
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match self.current_screen {
            Screen::Wizard => self.handle_wizard(event),
            Screen::Submitted => self.handle_submitted(event),
            Screen::Exit => self.handle_exit(event),
        }
    }

    /// 请求退出（Ctrl+C 或 Esc）
    pub fn request_exit(&mut self) {
        if self.current_screen != Screen::Exit {
            self.previous_screen = self.current_screen;
            self.current_screen = Screen::Exit;
        }
    }

    fn handle_wizard(&mut self, event: TuiEvent) -> bool {
        if self.form.in_input_mode {
            self.handle_input(event);
            return false;
        }

        let rows = self.rows();
        match event {
            TuiEvent::Up => self.form.prev_row(rows.len()),
            TuiEvent::Down => self.form.next_row(rows.len()),
            TuiEvent::Tab => self.go_next(),
            TuiEvent::BackTab => self.go_prev(),
            TuiEvent::Char(c) if c.is_ascii_digit() => {
                let target = c.to_digit(10).unwrap_or(0) as usize;
                self.jump_to(target);
            }
            TuiEvent::Left => {
                if self.form.selected_field(&rows) == Some(Field::Gender) {
                    self.cycle_gender(false);
                }
            }
            TuiEvent::Right => {
                if self.form.selected_field(&rows) == Some(Field::Gender) {
                    self.cycle_gender(true);
                }
            }
            TuiEvent::Enter => match self.form.selected_row(&rows) {
                Some(FormRow::Field(Field::Gender)) => self.cycle_gender(true),
                Some(FormRow::Field(field)) => {
                    let current = if field == Field::File {
                        String::new()
                    } else {
                        self.wizard.record().display_value(field)
                    };
                    self.form.enter_input_mode(&current);
                }
                Some(FormRow::Prev) => self.go_prev(),
                Some(FormRow::Next) => self.go_next(),
                None => {}
            },
            TuiEvent::Delete | TuiEvent::Backspace => {
                if let Some(field) = self.form.selected_field(&rows) {
                    self.apply_edit(field, Ok(FieldValue::Cleared));
                }
            }
            TuiEvent::Paste(text) => {
                if let Some(field) = self.form.selected_field(&rows)
                    && field != Field::Gender
                {
                    self.form.enter_input_mode("");
                    self.form.input.insert_str(text.trim());
                }
            }
            TuiEvent::Escape => self.request_exit(),
            _ => {}
        }
        false
    }

    fn handle_input(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Enter => {
                let rows = self.rows();
                let raw = self.form.exit_input_mode();
                if let Some(field) = self.form.selected_field(&rows) {
                    let parsed = FieldValue::parse(field, &raw);
                    self.apply_edit(field, parsed);
                }
            }
            TuiEvent::Escape => {
                self.form.exit_input_mode();
            }
            TuiEvent::Char(c) => self.form.input.insert_char(c),
            TuiEvent::Paste(text) => self.form.input.insert_str(&text),
            TuiEvent::Backspace => self.form.input.delete_before_cursor(),
            TuiEvent::Delete => self.form.input.delete_after_cursor(),
            TuiEvent::Left => self.form.input.move_cursor_left(),
            TuiEvent::Right => self.form.input.move_cursor_right(),
            TuiEvent::Home => self.form.input.move_cursor_to_start(),
            TuiEvent::End => self.form.input.move_cursor_to_end(),
            _ => {}
        }
    }

    fn handle_submitted(&mut self, event: TuiEvent) -> bool {
        matches!(
            event,
            TuiEvent::Enter | TuiEvent::Escape | TuiEvent::Char('q') | TuiEvent::Char('Q')
        )
    }

    fn handle_exit(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Char('y') | TuiEvent::Char('Y') => return true,
            TuiEvent::Char('n') | TuiEvent::Char('N') | TuiEvent::Escape => {
                self.current_screen = self.previous_screen;
            }
            _ => {}
        }
        false
    }

    fn cycle_gender(&mut self, forward: bool) {
        let next = match self.wizard.record().gender {
            Some(gender) if forward => gender.next(),
            Some(gender) => gender.prev(),
            None => Gender::variants()[0],
        };
        self.apply_edit(Field::Gender, Ok(FieldValue::Gender(next)));
    }

    fn apply_edit(&mut self, field: Field, value: crate::error::Result<FieldValue>) {
        match value.and_then(|value| self.wizard.update_field(field, value)) {
            Ok(()) => {
                debug!(%field, "Field updated from TUI");
                self.message = None;
            }
            Err(Error::StateWithoutCountry) => {
                self.message = Some(StatusMessage::new(
                    MessageKind::Warning,
                    t!("msg_state_without_country"),
                ));
            }
            Err(e) => {
                self.message = Some(StatusMessage::new(MessageKind::Error, e.to_string()));
            }
        }
    }

    fn go_next(&mut self) {
        match self.wizard.go_next() {
            Ok(transition) => self.after_transition(transition),
            Err(e) => {
                error!(error = %e, "Advancing the wizard failed");
                self.message = Some(StatusMessage::new(MessageKind::Error, e.to_string()));
            }
        }
    }

    fn go_prev(&mut self) {
        let transition = self.wizard.go_prev();
        self.after_transition(transition);
    }

    fn jump_to(&mut self, target: usize) {
        match self.wizard.jump_to(target) {
            Ok(transition) => self.after_transition(transition),
            Err(e) => {
                self.message = Some(StatusMessage::new(MessageKind::Warning, e.to_string()));
            }
        }
    }

    fn after_transition(&mut self, transition: Transition) {
        let kind = match &transition {
            Transition::Blocked { .. } | Transition::Rewound { .. } => MessageKind::Warning,
            Transition::Submitted => MessageKind::Success,
            Transition::Moved { .. } | Transition::Stayed => MessageKind::Info,
        };
        self.message = Some(StatusMessage::new(kind, transition_message(&transition)));

        match transition {
            Transition::Moved { .. } => self.form.reset(),
            Transition::Blocked { failed, .. } => {
                let rows = self.rows();
                let first = rows.iter().find_map(|row| match row {
                    FormRow::Field(field) if failed.contains(field) => Some(*field),
                    _ => None,
                });
                if let Some(first) = first {
                    self.form.focus_field(&rows, first);
                }
            }
            Transition::Rewound { failed, .. } => {
                self.form.reset();
                let rows = self.rows();
                if let Some(first) = failed.iter().find(|f| self.wizard.step().owns(**f)) {
                    self.form.focus_field(&rows, *first);
                }
            }
            Transition::Submitted => self.current_screen = Screen::Submitted,
            Transition::Stayed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ProfileImage;
    use crate::submit::MemorySink;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn app() -> AppState {
        let sink: Box<dyn SubmissionSink> = Box::new(MemorySink::new());
        AppState::new(StepWizard::new(sink))
    }

    fn type_into(app: &mut AppState, field: Field, text: &str) {
        let rows = app.rows();
        app.form.focus_field(&rows, field);
        app.handle_event(TuiEvent::Enter);
        assert!(app.form.in_input_mode);
        for c in text.chars() {
            app.handle_event(TuiEvent::Char(c));
        }
        app.handle_event(TuiEvent::Enter);
    }

    #[test]
    fn test_blocked_next_focuses_first_invalid_field() {
        let mut app = app();
        app.handle_event(TuiEvent::Tab);

        assert_eq!(app.wizard.current_step(), 1);
        assert_eq!(
            app.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Warning)
        );
        let rows = app.rows();
        assert_eq!(app.form.selected_field(&rows), Some(Field::File));
    }

    #[test]
    fn test_typing_updates_record_and_errors() {
        let mut app = app();
        type_into(&mut app, Field::FirstName, "Al");
        assert_eq!(app.wizard.record().first_name, "Al");
        assert!(app.wizard.errors().contains(Field::FirstName));

        type_into(&mut app, Field::FirstName, "i");
        assert_eq!(app.wizard.record().first_name, "Ali");
        assert!(!app.wizard.errors().contains(Field::FirstName));
    }

    #[test]
    fn test_escape_in_input_discards() {
        let mut app = app();
        let rows = app.rows();
        app.form.focus_field(&rows, Field::Email);
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Char('x'));
        app.handle_event(TuiEvent::Escape);

        assert!(!app.form.in_input_mode);
        assert_eq!(app.wizard.record().email, "");
        assert_eq!(app.current_screen, Screen::Wizard);
    }

    #[test]
    fn test_gender_cycles() {
        let mut app = app();
        let rows = app.rows();
        app.form.focus_field(&rows, Field::Gender);

        app.handle_event(TuiEvent::Right);
        assert_eq!(app.wizard.record().gender, Some(Gender::Male));
        app.handle_event(TuiEvent::Right);
        assert_eq!(app.wizard.record().gender, Some(Gender::Female));
        app.handle_event(TuiEvent::Delete);
        assert_eq!(app.wizard.record().gender, None);
    }

    #[test]
    fn test_full_session_submits() {
        let mut image = NamedTempFile::new().unwrap();
        image.write_all(b"portrait").unwrap();

        let mut app = app();
        type_into(&mut app, Field::File, &image.path().display().to_string());
        type_into(&mut app, Field::FirstName, "Tunde");
        type_into(&mut app, Field::LastName, "Bakare");
        type_into(&mut app, Field::Email, "tunde@example.com");
        let rows = app.rows();
        app.form.focus_field(&rows, Field::Gender);
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Tab);
        assert_eq!(app.wizard.current_step(), 2);
        assert_eq!(app.form.selected, 0);

        // 未选国家时不能填写州
        type_into(&mut app, Field::State, "Oyo");
        assert_eq!(
            app.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Warning)
        );
        type_into(&mut app, Field::Country, "Nigeria");
        type_into(&mut app, Field::State, "Oyo");
        type_into(&mut app, Field::City, "Ibadan");
        type_into(&mut app, Field::Address, "7 Ring Road");
        type_into(&mut app, Field::PhoneNumber, "08098765432");
        app.handle_event(TuiEvent::Tab);
        assert_eq!(app.wizard.current_step(), 3);

        type_into(&mut app, Field::AccountName, "Tunde Bakare");
        type_into(&mut app, Field::AccountNumber, "1234567890");
        type_into(&mut app, Field::BankName, "Wema Bank");
        app.handle_event(TuiEvent::Tab);

        assert!(app.wizard.is_submitted());
        assert_eq!(app.current_screen, Screen::Submitted);
        assert!(app.result().submitted);
        assert!(app.handle_event(TuiEvent::Enter));
    }

    #[test]
    fn test_digit_jump_forward_blocked_and_out_of_range() {
        let mut app = app();
        app.handle_event(TuiEvent::Char('3'));
        assert_eq!(app.wizard.current_step(), 1);

        app.handle_event(TuiEvent::Char('9'));
        assert_eq!(app.wizard.current_step(), 1);
        assert_eq!(
            app.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Warning)
        );
    }

    fn pass_basic_step(app: &mut AppState) {
        let image = ProfileImage {
            file_name: "portrait.png".to_string(),
            size: 8,
            digest: "00000000000000aa".to_string(),
        };
        app.wizard.update_field(Field::File, FieldValue::Image(image)).unwrap();
        app.wizard
            .update_field(Field::FirstName, FieldValue::Text("Tunde".into()))
            .unwrap();
        app.wizard
            .update_field(Field::LastName, FieldValue::Text("Bakare".into()))
            .unwrap();
        app.wizard
            .update_field(Field::Email, FieldValue::Text("tunde@example.com".into()))
            .unwrap();
        app.wizard
            .update_field(Field::Gender, FieldValue::Gender(Gender::Male))
            .unwrap();
        app.handle_event(TuiEvent::Tab);
        assert_eq!(app.wizard.current_step(), 2);
    }

    #[test]
    fn test_digit_jumps_back_without_validation() {
        let mut app = app();
        pass_basic_step(&mut app);

        // 第二步全部为空，后退不校验
        app.handle_event(TuiEvent::Tab);
        assert!(app.wizard.errors().contains(Field::City));
        app.handle_event(TuiEvent::Char('1'));

        assert_eq!(app.wizard.current_step(), 1);
        assert_eq!(
            app.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Info)
        );
    }

    #[test]
    fn test_digit_jump_stops_on_invalid_middle_step() {
        let mut app = app();
        pass_basic_step(&mut app);
        app.handle_event(TuiEvent::Char('1'));

        app.handle_event(TuiEvent::Char('3'));

        assert_eq!(app.wizard.current_step(), 2);
        let rows = app.rows();
        assert_eq!(app.form.selected_field(&rows), Some(Field::Country));
    }

    #[test]
    fn test_empty_state_input_without_country_is_quiet() {
        let mut app = app();
        pass_basic_step(&mut app);
        app.message = None;

        type_into(&mut app, Field::State, "");

        assert!(app.message.is_none());
        assert_eq!(app.wizard.record().state, "");
    }

    #[test]
    fn test_exit_confirmation() {
        let mut app = app();
        assert!(!app.handle_event(TuiEvent::Escape));
        assert_eq!(app.current_screen, Screen::Exit);
        assert!(!app.handle_event(TuiEvent::Char('n')));
        assert_eq!(app.current_screen, Screen::Wizard);

        app.request_exit();
        assert!(app.handle_event(TuiEvent::Char('y')));
    }
}
