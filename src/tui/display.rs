//! 非交互模式的结果显示

use crate::record::OnboardingRecord;
use crate::schema::ErrorMap;
use crate::steps::StepDefinition;
use crate::tui::labels::field_label;
use rust_i18n::t;

/// 打印向导快照：当前步骤、各字段取值与错误
pub fn display_snapshot(
    steps: &[StepDefinition],
    current_step: usize,
    record: &OnboardingRecord,
    errors: &ErrorMap,
) {
    println!("\n{}", "═".repeat(60));
    if let Some(step) = steps.get(current_step.saturating_sub(1)) {
        let progress = t!("step_progress", current = current_step, total = steps.len());
        println!("{:^60}", format!("{} · {}", progress, step.title()));
    }
    println!("{}", "═".repeat(60));

    for step in steps {
        let marker = if step.id == current_step { ">" } else { " " };
        println!("\n {} {}", marker, step.title());
        println!("   {}", "─".repeat(40));
        for field in step.fields {
            let value = record.display_value(*field);
            let value = if value.is_empty() {
                t!("value_empty").to_string()
            } else {
                value
            };
            println!("     {}: {}", field_label(*field), value);
            if let Some(message) = errors.message(*field) {
                println!("       ✗ {}", message);
            }
        }
    }

    println!("\n{}", "═".repeat(60));
}

/// 是否运行交互模式（无参数时启用）
pub fn should_run_interactive() -> bool {
    std::env::args().len() == 1
}
