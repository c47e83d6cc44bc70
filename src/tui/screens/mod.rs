//! 各屏幕渲染

pub mod exit;
pub mod submitted;
pub mod wizard;
