//! TUI 状态模块

pub mod app;
pub mod form;
pub mod input;

pub use app::{AppState, MessageKind, Screen, StatusMessage, TuiResult, TuiWizard};
pub use form::{FormRow, FormState, form_rows};
pub use input::InputState;
