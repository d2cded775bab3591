mod app;
mod config;
mod core;
mod models;
mod ui;
mod utils;
mod vfs;

use anyhow::Context;
use app::{App, AppConfig};
use clap::Parser;
use core::actions::{find_action, find_sequence_action, is_sequence_prefix};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// 로그 필터 환경 변수
const LOG_ENV: &str = "MUCOMMANDER_LOG";
const LOG_FILE_NAME: &str = "mucommander.log";

/// 듀얼 패널 파일 관리자
#[derive(Debug, Parser)]
#[command(name = "mucommander", version, about)]
struct Cli {
    /// 왼쪽 패널 시작 폴더
    left: Option<PathBuf>,
    /// 오른쪽 패널 시작 폴더
    right: Option<PathBuf>,
    /// 설정 폴더 (기본: <config_dir>/mucommander)
    #[arg(long, value_name = "DIR")]
    preferences: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let prefs_dir = config::resolve_prefs_dir(cli.preferences.as_deref())?;
    init_logging(&prefs_dir)?;
    tracing::info!(prefs = %prefs_dir.display(), "starting");

    let mut app = App::new(AppConfig {
        prefs_dir,
        left_folder: cli.left,
        right_folder: cli.right,
    })
    .context("failed to initialize")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.shutdown() {
        eprintln!("Failed to save preferences: {}", e);
    }
    if let Err(err) = res {
        tracing::error!(error = %err, "terminated with error");
        eprintln!("Error: {:?}", err);
    }
    tracing::info!("exiting");

    Ok(())
}

/// 설정 폴더의 로그 파일로 tracing 출력 (화면을 쓰므로 stderr 대신 파일)
fn init_logging(prefs_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(prefs_dir)
        .with_context(|| format!("cannot create {}", prefs_dir.display()))?;
    let log_path = prefs_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::renderer::render(f, app))?;

        let poll_timeout = if app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_popup_active() {
                        app.handle_popup_key(key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }

        app.drain_theme_events();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // 1) pending 키 시퀀스 처리 (gg, sn, tn ...)
    if let Some(pending) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(pending, c) {
                app.execute_action(action);
            }
        }
        return;
    }

    // 2) 시퀀스 시작 키
    if modifiers == KeyModifiers::NONE {
        if let KeyCode::Char(c) = code {
            if is_sequence_prefix(c) {
                app.set_pending_key(c);
                return;
            }
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}
