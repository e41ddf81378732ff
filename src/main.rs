mod app;
mod cli;
mod domain;
mod infra;
mod ui;

use crate::app::{AppCommand, AppEvent, AppModel, Flow};
use crate::cli::CliInvocation;
use crate::infra::{SystemGateway, init_tracing, resolve_config, trace_log_path};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    App(#[from] crate::app::AppError),

    #[error(transparent)]
    Config(#[from] crate::infra::ConfigError),

    #[error("failed to open trace log {path}: {source}")]
    TraceLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn main() {
    if let Err(error) = run_main() {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    let invocation = match crate::cli::parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{error}");
            let _ = writeln!(err, "{}", crate::cli::usage());
            std::process::exit(2);
        }
    };

    match invocation {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Tui { root } => run_tui(root),
    }
}

fn print_help() {
    let text = format!(
        "{name} - btrfs snapshot dashboard\n\n{usage}\n\nKEYS:\n  q / Ctrl+C   Quit\n  Left/Right   Switch between subvolumes and snapshots\n  Up/Down      Move the selection\n  t            Create a snapshot of the selected subvolume\n  r            Remove the selected snapshot\n  b            Run btrfs balance on the partition\n  g            Regenerate the GRUB configuration\n  Enter        Confirm or close a dialog\n  c / Esc      Cancel a confirmation\n\nENV:\n  SUBVOLUME_PREFIX     Prefix of active subvolumes (default: _active)\n  SNAPSHOT_PREFIX      Prefix of snapshots (default: _snapshots)\n  BALANCE_USAGE        Data usage filter for balance, 0-100 (default: 15)\n  GRUB_CONFIG_PATH     GRUB config output path (default: /boot/grub/grub.cfg)\n  SNAPDECK_TRACE_LOG   Write JSON trace logs to this file (level from RUST_LOG)\n",
        name = env!("CARGO_PKG_NAME"),
        usage = crate::cli::usage(),
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}

fn run_tui(root: PathBuf) -> Result<(), MainError> {
    let config = resolve_config(root)?;
    if let Some(path) = trace_log_path() {
        init_tracing(&path).map_err(|source| MainError::TraceLog { path, source })?;
    }
    tracing::info!(
        root = %config.root.display(),
        active_prefix = %config.prefixes.active,
        snapshot_prefix = %config.prefixes.snapshot,
        "starting dashboard"
    );

    let gateway = SystemGateway::new(
        config.prefixes.clone(),
        config.balance_usage,
        config.grub_config_path.clone(),
    );
    let mut model = AppModel::new(Arc::new(config));

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut model, &gateway);
    restore_terminal(&mut terminal)?;
    tracing::info!("dashboard closed");
    Ok(result?)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, app::AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), app::AppError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
    gateway: &SystemGateway,
) -> Result<(), app::AppError> {
    app::run_command(model, gateway, AppCommand::Refresh);

    loop {
        terminal.draw(|frame| ui::render(frame, model))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        let (next, command) = app::update(model.clone(), AppEvent::Key(key));
        *model = next;
        if app::run_command(model, gateway, command) == Flow::Quit {
            return Ok(());
        }
    }
}
