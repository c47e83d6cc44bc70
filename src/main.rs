//! Driver Onboarding - Multi-step driver registration wizard
//!
//! Runs the interactive terminal wizard, or replays a script of wizard
//! actions headlessly and prints the resulting state.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use driver_onboarding::{
    ActionOutcome, ActionResult, Cli, Config, JsonFileSink, LogSink, Script, StepWizard,
    SubmissionSink, TuiApp, WizardOptions, display_snapshot, init_locale, should_run_interactive,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize i18n for this binary
rust_i18n::i18n!("locales", fallback = "en");

// CLI Output Module
mod cli_output {
    //! CLI 输出美化模块
    //!
    //! 为命令行输出提供统一的颜色和格式样式。

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI 主题颜色
    pub struct CliTheme;

    impl CliTheme {
        /// 成功颜色（绿色）
        pub const SUCCESS: Color = Color::Green;
        /// 警告颜色（黄色）
        pub const WARNING: Color = Color::Yellow;
        /// 错误颜色（红色）
        pub const ERROR: Color = Color::Red;
        /// 提示颜色（暗灰色）
        pub const HINT: Color = Color::DarkGrey;
        /// 强调颜色（青色）
        pub const ACCENT: Color = Color::Cyan;
    }

    /// 打印分隔线
    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    /// 打印错误消息
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// 打印统计项
    pub fn print_stat(key: &str, value: &str, color: Color) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(key).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(style(value).with(color).bold()));
        let _ = stdout().execute(Print("\n"));
    }

    /// 打印单个动作结果行
    pub fn print_result(status_icon: &str, status_color: Color, action: &str, detail: &str) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(status_icon).with(status_color).bold()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(action).italic()));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(style(detail).with(CliTheme::HINT)));
        let _ = stdout().execute(Print("\n"));
    }

    /// 打印日志文件路径
    pub fn print_log_path(label: &str, path: &str) {
        let _ = stdout().execute(Print("\n"));
        let _ = stdout().execute(Print(style("  📁 ").with(CliTheme::ACCENT)));
        let _ = stdout().execute(Print(style(format!("{}: ", label)).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", path)));
    }
}

/// Convenience macro for translation
macro_rules! t {
    ($key:expr) => {
        rust_i18n::t!($key)
    };
    ($key:expr, $($tt:tt)*) => {
        rust_i18n::t!($key, $($tt)*)
    };
}

fn main() -> Result<ExitCode> {
    if should_run_interactive() {
        init_locale(None);
        run_interactive_mode(Config::default(), None)?;
        return Ok(ExitCode::SUCCESS);
    }

    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", Config::sample_config());
        return Ok(ExitCode::SUCCESS);
    }

    let exe_dir = get_executable_dir()?;
    let config = load_config(&cli, &exe_dir)?;
    init_locale(config.locale.as_deref());

    match cli.script.clone() {
        Some(script_path) => run_script_mode(&cli, config, &exe_dir, &script_path),
        None => {
            run_interactive_mode(config, cli.config_name())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run the terminal wizard
fn run_interactive_mode(config: Config, config_name: Option<String>) -> Result<()> {
    let exe_dir = get_executable_dir()?;
    let log_path = get_log_path(&exe_dir, &config, config_name.as_deref(), "Interactive");

    // Setup file-only logging before TUI starts
    let _guard = setup_file_only_logging(&log_path, config.verbose)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Driver onboarding starting in interactive mode"
    );

    let wizard = StepWizard::with_options(build_sink(&config), WizardOptions::from(&config));
    let mut app = TuiApp::new(wizard)?;
    app.set_log_path(log_path.clone());
    app.set_submission_target(config.submission_file.clone());

    let result = app.run()?;
    if result.submitted {
        info!(log_file = %log_path.display(), "Interactive session complete");
    } else {
        info!("User left before submitting");
    }

    Ok(())
}

/// Replay a script and print what happened
///
/// The log guard lives until this returns, so every line is flushed
/// before the process exits.
fn run_script_mode(
    cli: &Cli,
    config: Config,
    exe_dir: &Path,
    script_path: &Path,
) -> Result<ExitCode> {
    let log_path = get_log_path(exe_dir, &config, cli.config_name().as_deref(), "Script");
    let _guard = setup_logging(&log_path, config.verbose, cli.json_log)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Driver onboarding starting in script mode"
    );
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    let script = Script::load_from_file(script_path)?;
    let mut wizard = StepWizard::with_options(build_sink(&config), WizardOptions::from(&config));

    use cli_output::*;

    print_separator();
    let outcome = script.run_with(&mut wizard, print_outcome);

    display_snapshot(
        wizard.steps(),
        wizard.current_step(),
        wizard.record(),
        wizard.errors(),
    );

    match outcome {
        Ok(report) => {
            let submitted = if report.submitted {
                t!("cli_yes")
            } else {
                t!("cli_no")
            };
            print_stat(
                &t!("cli_actions"),
                &report.outcomes.len().to_string(),
                CliTheme::ACCENT,
            );
            print_stat(
                &t!("cli_rejected"),
                &report.rejected().to_string(),
                CliTheme::WARNING,
            );
            print_stat(
                &t!("cli_submitted"),
                &submitted,
                if report.submitted {
                    CliTheme::SUCCESS
                } else {
                    CliTheme::WARNING
                },
            );
            if let Some(path) = &config.submission_file
                && report.submitted
            {
                print_stat(
                    &t!("cli_submission_file"),
                    &path.display().to_string(),
                    CliTheme::SUCCESS,
                );
            }
            print_log_path(&t!("cli_log_file"), &log_path.display().to_string());
            info!(log_file = %log_path.display(), "Script run complete");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Script run failed");
            print_error(&e.to_string());
            print_log_path(&t!("cli_log_file"), &log_path.display().to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Print one script action as it completes
fn print_outcome(outcome: &ActionOutcome) {
    use cli_output::*;

    let action = outcome.action.to_string();
    let detail = t!(
        "cli_outcome_detail",
        step = outcome.step_after,
        errors = outcome.error_count
    );
    match &outcome.result {
        ActionResult::Navigated(transition) if transition.is_blocked() => {
            print_result("⊘", CliTheme::WARNING, &action, &detail)
        }
        ActionResult::Navigated(_) | ActionResult::Checked => {
            print_result("→", CliTheme::ACCENT, &action, &detail)
        }
        ActionResult::Edited => print_result("✓", CliTheme::SUCCESS, &action, &detail),
        ActionResult::Rejected(reason) => print_result(
            "✗",
            CliTheme::ERROR,
            &action,
            &format!("{} ({})", reason, detail),
        ),
    }
}

/// Pick the submission sink from the configuration
fn build_sink(config: &Config) -> Box<dyn SubmissionSink> {
    match &config.submission_file {
        Some(path) => Box::new(JsonFileSink::new(path)),
        None => Box::new(LogSink),
    }
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(exe_dir: &Path, config: &Config, config_name: Option<&str>, mode: &str) -> PathBuf {
    let log_dir = config.resolve_log_dir(exe_dir);
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    match config_name {
        Some(name) => log_dir.join(name).join(format!("{}_{}.log", name, timestamp)),
        None => log_dir.join(format!("{}_{}.log", mode, timestamp)),
    }
}

/// Resolve config path - supports shorthand syntax
fn resolve_config_path(exe_dir: &Path, config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    let with_extension = if config_path.extension().is_none() {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    if with_extension.exists() {
        return with_extension;
    }

    let config_dir = exe_dir.join("Config");
    let filename = config_path.file_name().unwrap_or(config_path.as_os_str());

    let mut in_config_dir = config_dir.join(filename);
    if in_config_dir.extension().is_none() {
        in_config_dir = in_config_dir.with_extension("toml");
    }

    if in_config_dir.exists() {
        return in_config_dir;
    }

    config_path.to_path_buf()
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli, exe_dir: &Path) -> Result<Config> {
    let config = match &cli.config {
        Some(config_path) => {
            let resolved_path = resolve_config_path(exe_dir, config_path);
            let file_config = Config::load_from_file(&resolved_path)?;
            cli.merge_with_config(file_config)
        }
        None => cli.to_config(),
    };

    Ok(config)
}

/// Open the log file, creating its directory
fn open_log_file(log_path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;
    Ok(file)
}

/// Log level for the configured verbosity
fn log_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

/// Non-blocking writer into the log file; lines are flushed when the
/// guard drops
fn file_writer(log_path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    Ok(tracing_appender::non_blocking(open_log_file(log_path)?))
}

/// Setup logging for script mode (file + console)
fn setup_logging(log_path: &Path, verbose: bool, json_log: bool) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level(verbose).into())
        .from_env_lossy();

    let (non_blocking, guard) = file_writer(log_path)?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(guard)
}

/// Setup logging for interactive mode (file only, no console)
fn setup_file_only_logging(log_path: &Path, verbose: bool) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level(verbose).into())
        .from_env_lossy();

    let (non_blocking, guard) = file_writer(log_path)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}
