use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, ConfigFile};
use crate::loader::{LoadOutcome, LoadRequest, Loader};
use crate::locale::Locale;
use crate::quran::models::{CHAPTER_COUNT, ChapterListItem, JUZ_COUNT};
use crate::session::practice::{PracticeSession, PracticeSource};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Select,
    Practice,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    #[default]
    Juz,
    Surah,
}

impl PracticeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PracticeMode::Juz => "juz",
            PracticeMode::Surah => "surah",
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub mode: PracticeMode,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    /// Runtime settings, command-line overrides included.
    pub config: Config,
    config_file: Option<ConfigFile>,
    pub locale: Locale,
    pub should_quit: bool,
    pub juz_selected: usize,
    pub surah_selected: usize,
    pub chapters: Option<Arc<[ChapterListItem]>>,
    pub session: Option<PracticeSession>,
    pub loading: bool,
    pub fetch_failed: bool,
    loader: Loader,
    seq: u64,
}

impl App {
    /// `config_file` is `None` when the file could not be read; the locale
    /// toggle then stays in memory.
    pub fn new(
        config: Config,
        config_file: Option<ConfigFile>,
        theme: &'static Theme,
        loader: Loader,
    ) -> Self {
        let locale = config.locale;
        locale.activate();
        let mode = config.default_mode;
        let app = Self {
            screen: AppScreen::Menu,
            mode,
            menu: Menu::new(theme),
            theme,
            config,
            config_file,
            locale,
            should_quit: false,
            juz_selected: 0,
            surah_selected: 0,
            chapters: None,
            session: None,
            loading: false,
            fetch_failed: false,
            loader,
            seq: 0,
        };
        app.loader.request(LoadRequest::ChapterList);
        app
    }

    pub fn go_to_menu(&mut self) {
        self.reset();
        self.screen = AppScreen::Menu;
    }

    pub fn choose_mode(&mut self, mode: PracticeMode) {
        self.mode = mode;
        self.reset();
        self.screen = AppScreen::Select;
    }

    pub fn toggle_locale(&mut self) {
        self.locale = self.locale.toggled();
        self.locale.activate();
        self.config.locale = self.locale;
        if let Some(file) = self.config_file.as_mut() {
            if let Err(e) = file.save_locale(self.locale) {
                warn!(error = %e, path = %file.path().display(), "could not save locale");
            }
        }
    }

    /// Number of rows in the current selector.
    pub fn select_len(&self) -> usize {
        match self.mode {
            PracticeMode::Juz => usize::from(JUZ_COUNT),
            PracticeMode::Surah => self.chapters.as_ref().map_or(0, |c| c.len()),
        }
    }

    pub fn select_index(&self) -> usize {
        match self.mode {
            PracticeMode::Juz => self.juz_selected,
            PracticeMode::Surah => self.surah_selected,
        }
    }

    fn select_index_mut(&mut self) -> &mut usize {
        match self.mode {
            PracticeMode::Juz => &mut self.juz_selected,
            PracticeMode::Surah => &mut self.surah_selected,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.select_len();
        if len == 0 {
            return;
        }
        let idx = self.select_index_mut();
        *idx = (*idx + 1) % len;
    }

    pub fn select_prev(&mut self) {
        let len = self.select_len();
        if len == 0 {
            return;
        }
        let idx = self.select_index_mut();
        *idx = if *idx == 0 { len - 1 } else { *idx - 1 };
    }

    /// Jump the selector by `delta` rows, stopping at either end.
    pub fn select_page(&mut self, delta: isize) {
        let len = self.select_len();
        if len == 0 {
            return;
        }
        let idx = self.select_index_mut();
        *idx = idx.saturating_add_signed(delta).min(len - 1);
    }

    pub fn selected_source(&self) -> Option<PracticeSource> {
        match self.mode {
            PracticeMode::Juz => {
                let juz = u8::try_from(self.juz_selected + 1).ok()?;
                (juz <= JUZ_COUNT).then_some(PracticeSource::Juz(juz))
            }
            PracticeMode::Surah => self
                .chapters
                .as_ref()?
                .get(self.surah_selected)
                .map(|c| PracticeSource::Surah(c.id)),
        }
    }

    /// Preselect `source` and start a passage from it.
    pub fn start_with(&mut self, source: PracticeSource) {
        match source {
            PracticeSource::Juz(juz) => {
                self.mode = PracticeMode::Juz;
                self.juz_selected = usize::from(juz.clamp(1, JUZ_COUNT)) - 1;
            }
            PracticeSource::Surah(chapter) => {
                self.mode = PracticeMode::Surah;
                self.surah_selected = usize::from(chapter.clamp(1, CHAPTER_COUNT)) - 1;
            }
        }
        self.screen = AppScreen::Select;
        self.generate_from(source);
    }

    pub fn generate(&mut self) {
        if let Some(source) = self.selected_source() {
            self.generate_from(source);
        }
    }

    pub fn generate_another(&mut self) {
        if let Some(source) = self.session.as_ref().map(|s| s.source) {
            self.generate_from(source);
        }
    }

    fn generate_from(&mut self, source: PracticeSource) {
        if self.loading {
            return;
        }
        self.seq += 1;
        self.session = None;
        self.fetch_failed = false;
        self.loading = true;
        debug!(?source, seq = self.seq, "requesting passage");
        let queued = self.loader.request(LoadRequest::Passage {
            seq: self.seq,
            source,
            hide_count: self.config.reveal_count,
        });
        if !queued {
            self.loading = false;
            self.fetch_failed = true;
        }
    }

    /// Drop the current passage and any load in flight.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.session = None;
        self.loading = false;
        self.fetch_failed = false;
        if self.screen == AppScreen::Practice {
            self.screen = AppScreen::Select;
        }
    }

    pub fn reveal_next(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reveal_next();
        }
    }

    pub fn reveal_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reveal_all();
        }
    }

    pub fn handle_loaded(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Passage { seq, result } => {
                if seq != self.seq {
                    debug!(seq, current = self.seq, "dropping superseded passage");
                    return;
                }
                self.loading = false;
                match result {
                    Ok(Some(session)) => {
                        self.session = Some(session);
                        self.screen = AppScreen::Practice;
                    }
                    Ok(None) => self.fetch_failed = true,
                    Err(e) => {
                        warn!(error = %e, "passage load failed");
                        self.fetch_failed = true;
                    }
                }
            }
            LoadOutcome::ChapterList(Ok(chapters)) => {
                if self.surah_selected >= chapters.len() {
                    self.surah_selected = 0;
                }
                self.chapters = Some(chapters);
            }
            // The surah selector stays empty; juz practice is unaffected.
            LoadOutcome::ChapterList(Err(e)) => warn!(error = %e, "chapter list load failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::engine::selection::Passage;
    use crate::quran::models::Verse;

    fn verse(key: &str) -> Verse {
        Verse {
            id: 0,
            verse_key: key.to_string(),
            text_uthmani: String::new(),
            translation: String::new(),
        }
    }

    fn session(source: PracticeSource) -> PracticeSession {
        let passage = Passage {
            start: verse("1:1"),
            hidden: vec![verse("1:2"), verse("1:3")],
        };
        PracticeSession::new(source, passage)
    }

    fn chapters() -> Arc<[ChapterListItem]> {
        (1..=3)
            .map(|id| ChapterListItem {
                id,
                name_arabic: String::new(),
                name_simple: format!("chapter {id}"),
                verses_count: 7,
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn test_app() -> (App, mpsc::Receiver<LoadRequest>) {
        let (tx, rx) = mpsc::channel();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let app = App::new(Config::default(), None, theme, Loader::from_sender(tx));
        (app, rx)
    }

    fn next_passage_seq(rx: &mpsc::Receiver<LoadRequest>) -> (u64, PracticeSource) {
        for request in rx.try_iter() {
            if let LoadRequest::Passage { seq, source, .. } = request {
                return (seq, source);
            }
        }
        panic!("no passage request queued");
    }

    #[test]
    fn test_new_app_requests_chapter_list() {
        let (_app, rx) = test_app();
        assert!(matches!(rx.try_recv(), Ok(LoadRequest::ChapterList)));
    }

    #[test]
    fn test_juz_selector_wraps() {
        let (mut app, _rx) = test_app();
        app.choose_mode(PracticeMode::Juz);
        app.select_prev();
        assert_eq!(app.selected_source(), Some(PracticeSource::Juz(30)));
        app.select_next();
        assert_eq!(app.selected_source(), Some(PracticeSource::Juz(1)));
        app.select_page(100);
        assert_eq!(app.selected_source(), Some(PracticeSource::Juz(30)));
    }

    #[test]
    fn test_surah_selector_empty_until_chapters_load() {
        let (mut app, _rx) = test_app();
        app.choose_mode(PracticeMode::Surah);
        assert_eq!(app.selected_source(), None);
        app.select_next();

        app.handle_loaded(LoadOutcome::ChapterList(Ok(chapters())));
        app.select_next();
        assert_eq!(app.selected_source(), Some(PracticeSource::Surah(2)));
    }

    #[test]
    fn test_generate_then_loaded_enters_practice() {
        let (mut app, rx) = test_app();
        app.choose_mode(PracticeMode::Juz);
        app.generate();
        assert!(app.loading);
        let (seq, source) = next_passage_seq(&rx);
        assert_eq!(source, PracticeSource::Juz(1));

        app.handle_loaded(LoadOutcome::Passage {
            seq,
            result: Ok(Some(session(source))),
        });
        assert!(!app.loading);
        assert_eq!(app.screen, AppScreen::Practice);
        app.reveal_all();
        assert!(app.session.as_ref().unwrap().is_complete());
    }

    #[test]
    fn test_superseded_passage_is_dropped() {
        let (mut app, rx) = test_app();
        app.choose_mode(PracticeMode::Juz);
        app.generate();
        let (seq, source) = next_passage_seq(&rx);
        app.reset();

        app.handle_loaded(LoadOutcome::Passage {
            seq,
            result: Ok(Some(session(source))),
        });
        assert!(app.session.is_none());
        assert_eq!(app.screen, AppScreen::Select);
    }

    #[test]
    fn test_failed_load_sets_error() {
        let (mut app, rx) = test_app();
        app.start_with(PracticeSource::Surah(2));
        let (seq, source) = next_passage_seq(&rx);
        assert_eq!(source, PracticeSource::Surah(2));
        assert_eq!(app.surah_selected, 1);

        app.handle_loaded(LoadOutcome::Passage {
            seq,
            result: Err(crate::quran::QuranError::Status {
                url: "u".to_string(),
                status: 500,
            }),
        });
        assert!(app.fetch_failed);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_generate_ignored_while_loading() {
        let (mut app, rx) = test_app();
        app.choose_mode(PracticeMode::Juz);
        app.generate();
        app.generate();
        let passages = rx
            .try_iter()
            .filter(|r| matches!(r, LoadRequest::Passage { .. }))
            .count();
        assert_eq!(passages, 1);
    }

    #[test]
    fn test_locale_toggle_persists_locale_not_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reveal_count = 3\n").unwrap();
        let file = ConfigFile::open(path.clone()).unwrap();
        let mut config = file.config();
        config.reveal_count = 12;
        config.theme = "gruvbox-dark".to_string();

        let (tx, _rx) = mpsc::channel();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut app = App::new(config, Some(file), theme, Loader::from_sender(tx));
        app.toggle_locale();
        let toggled = app.locale;
        app.toggle_locale();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.reveal_count, 3);
        assert_eq!(saved.theme, "catppuccin-mocha");
        assert_eq!(saved.locale, app.locale);
        assert_ne!(toggled, app.locale);
        assert_eq!(app.config.reveal_count, 12);
    }

    #[test]
    fn test_locale_toggle_without_file_stays_in_memory() {
        let (mut app, _rx) = test_app();
        let before = app.locale;
        app.toggle_locale();
        assert_ne!(app.locale, before);
        assert_eq!(app.config.locale, app.locale);
        app.toggle_locale();
    }
}
