mod app;
mod config;
mod engine;
mod event;
mod loader;
mod locale;
mod quran;
mod session;
mod ui;

rust_i18n::i18n!("locales", fallback = "en");

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use rust_i18n::t;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, PracticeMode};
use config::{Config, ConfigFile};
use event::{AppEvent, EventHandler};
use loader::Loader;
use locale::Locale;
use quran::QuranClient;
use quran::models::{CHAPTER_COUNT, JUZ_COUNT, juz_name};
use quran::transport::HttpTransport;
use session::practice::PracticeSource;
use ui::components::chapter_panel::ChapterPanel;
use ui::components::menu::MenuAction;
use ui::components::practice_view::PracticeView;
use ui::components::progress_bar::ProgressBar;
use ui::components::selector::{Selector, SelectorRow};
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "muraja", version, about = "Terminal Quran revision practice")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Interface language (en, ar)")]
    locale: Option<String>,

    #[arg(short, long, help = "Number of ayahs to hide after the starting ayah")]
    reveal: Option<usize>,

    #[arg(
        short,
        long,
        help = "Start straight away with a passage from this juz",
        value_parser = clap::value_parser!(u8).range(1..=i64::from(JUZ_COUNT)),
        conflicts_with = "surah"
    )]
    juz: Option<u8>,

    #[arg(
        short,
        long,
        help = "Start straight away with a passage from this surah",
        value_parser = clap::value_parser!(u16).range(1..=i64::from(CHAPTER_COUNT))
    )]
    surah: Option<u16>,

    #[arg(long, help = "Write logs here instead of the data directory")]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("muraja")
        .join("muraja.log")
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("muraja=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let config_file = match ConfigFile::open(Config::config_path()) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(error = %e, "config unreadable, using defaults and leaving the file alone");
            None
        }
    };
    let mut config = config_file.as_ref().map(ConfigFile::config).unwrap_or_default();
    if let Some(code) = cli.locale.as_deref() {
        match Locale::from_code(code) {
            Some(locale) => config.locale = locale,
            None => warn!(code, "unknown locale, keeping {}", config.locale.as_str()),
        }
    }
    if let Some(reveal) = cli.reveal {
        config.reveal_count = reveal;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.normalize();

    let loaded_theme = ui::theme::Theme::load(&config.theme).unwrap_or_default();
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(loaded_theme));

    let transport = HttpTransport::new(config.request_timeout())?;
    let client = Arc::new(QuranClient::new(transport, config.endpoints()));
    info!(api = %config.api_base, translation = config.translation_id, "starting");

    let events = EventHandler::new(Duration::from_millis(100));
    let loader = Loader::spawn(client, events.sender());
    let mut app = App::new(config, config_file, theme, loader);

    if let Some(juz) = cli.juz {
        app.start_with(PracticeSource::Juz(juz));
    } else if let Some(surah) = cli.surah {
        app.start_with(PracticeSource::Surah(surah));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        warn!(error = ?err, "exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Loaded(outcome) => app.handle_loaded(outcome),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Select => handle_select_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
    }
}

fn run_menu_action(app: &mut App, action: MenuAction) {
    match action {
        MenuAction::ByJuz => app.choose_mode(PracticeMode::Juz),
        MenuAction::BySurah => app.choose_mode(PracticeMode::Surah),
        MenuAction::ToggleLanguage => app.toggle_locale(),
        MenuAction::Quit => app.should_quit = true,
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => run_menu_action(app, MenuAction::ByJuz),
        KeyCode::Char('2') => run_menu_action(app, MenuAction::BySurah),
        KeyCode::Char('l') => run_menu_action(app, MenuAction::ToggleLanguage),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let action = app.menu.current();
            run_menu_action(app, action);
        }
        _ => {}
    }
}

fn handle_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('l') => app.toggle_locale(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_page(-10),
        KeyCode::PageDown => app.select_page(10),
        KeyCode::Enter | KeyCode::Char('g') => app.generate(),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.reset(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('l') => app.toggle_locale(),
        KeyCode::Enter | KeyCode::Char(' ') => app.reveal_next(),
        KeyCode::Char('a') => app.reveal_all(),
        KeyCode::Char('g') => app.generate_another(),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Select => render_select(frame, app),
        AppScreen::Practice => render_practice(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let mode = match app.mode {
        PracticeMode::Juz => t!("by_juz"),
        PracticeMode::Surah => t!("by_surah"),
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", t!("title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | {mode} ", t!("subtitle")),
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ];
    if app.loading {
        spans.push(Span::styled(
            format!(" {} ", t!("loading")),
            Style::default().fg(colors.accent()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().style(Style::default().bg(colors.header_bg())))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

/// Key hints for `screen` in `locale`. `revealing` is true while hidden
/// ayahs remain on the practice screen.
fn footer_hints(screen: AppScreen, revealing: bool, locale: &str) -> Vec<String> {
    let hint = |key: &str, label: &str| format!("[{key}] {}", t!(label, locale = locale));
    match screen {
        AppScreen::Menu => vec![
            hint("1-2", "hint_start"),
            hint("l", "hint_language"),
            hint("q", "quit"),
        ],
        AppScreen::Select => vec![
            hint("Enter", "generate_ayah"),
            hint("\u{2191}\u{2193}", "hint_move"),
            hint("l", "hint_language"),
            hint("Esc", "back"),
        ],
        AppScreen::Practice if revealing => vec![
            hint("Enter", "reveal_next"),
            hint("a", "reveal_all"),
            hint("r", "reset"),
        ],
        AppScreen::Practice => vec![hint("g", "generate_another"), hint("r", "reset")],
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let revealing = app.session.as_ref().is_some_and(|s| !s.is_complete());
    let hints = footer_hints(app.screen, revealing, app.locale.as_str());
    let hints: Vec<&str> = hints.iter().map(String::as_str).collect();
    let mut lines: Vec<Line> = pack_hint_lines(&hints, usize::from(area.width))
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    lines.push(Line::from(Span::styled(
        format!("  {}", t!("footer_text")),
        Style::default().fg(colors.accent_dim()),
    )));
    frame.render_widget(Paragraph::new(lines), area);
}

/// Loading, error or empty-state line shown where a passage would be.
fn status_line(app: &App) -> Option<Line<'static>> {
    let colors = &app.theme.colors;
    if app.loading {
        Some(Line::from(Span::styled(
            t!("loading").to_string(),
            Style::default().fg(colors.accent()),
        )))
    } else if app.fetch_failed {
        Some(Line::from(Span::styled(
            t!("fetch_error").to_string(),
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
        )))
    } else if app.session.is_none() {
        let prompt = match app.mode {
            PracticeMode::Juz => t!("empty_juz"),
            PracticeMode::Surah => t!("empty_surah"),
        };
        Some(Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(colors.text_muted()),
        )))
    } else {
        None
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(frame, app, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    render_footer(frame, app, layout[2]);
}

fn selector_rows(app: &App) -> Vec<SelectorRow> {
    let rtl = app.locale.is_rtl();
    match app.mode {
        PracticeMode::Juz => (1..=JUZ_COUNT)
            .map(|n| SelectorRow {
                number: n.to_string(),
                primary: format!("{} {n}", t!("juz_label")),
                secondary: juz_name(n).unwrap_or_default().to_string(),
            })
            .collect(),
        PracticeMode::Surah => app
            .chapters
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|c| {
                let (primary, secondary) = if rtl {
                    (c.name_arabic.clone(), c.name_simple.clone())
                } else {
                    (c.name_simple.clone(), c.name_arabic.clone())
                };
                SelectorRow {
                    number: c.id.to_string(),
                    primary,
                    secondary,
                }
            })
            .collect(),
    }
}

fn render_select(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(frame, app, layout[0]);

    let title = match app.mode {
        PracticeMode::Juz => t!("select_juz"),
        PracticeMode::Surah => t!("select_surah"),
    };
    let rows = selector_rows(app);
    let list_area = ui::layout::centered_rect(60, 100, layout[1]);
    let selector = Selector::new(title.to_string(), &rows, app.select_index(), app.theme)
        .rtl(app.locale.is_rtl());
    frame.render_widget(selector, list_area);

    if let Some(status) = status_line(app) {
        let status = Paragraph::new(status)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(status, layout[2]);
    }

    render_footer(frame, app, layout[3]);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);

    render_header(frame, app, app_layout.header);

    render_footer(frame, app, app_layout.footer);

    let Some(ref session) = app.session else {
        if let Some(status) = status_line(app) {
            let status = Paragraph::new(status)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(status, app_layout.main);
        }
        return;
    };

    let show_progress = app_layout.tier.show_progress_bar(area.height) && !session.hidden.is_empty();
    let mut constraints = vec![Constraint::Min(5)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(
        PracticeView::new(session, app.theme).rtl(app.locale.is_rtl()),
        main_layout[0],
    );

    if show_progress {
        let progress = ProgressBar::new(
            &t!("reveal_progress"),
            session.revealed,
            session.hidden.len(),
            app.theme,
        );
        frame.render_widget(progress, main_layout[1]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        frame.render_widget(ChapterPanel::new(session, app.theme), sidebar_area);
    }
}
