use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    ByJuz,
    BySurah,
    ToggleLanguage,
    Quit,
}

const ACTIONS: [MenuAction; 4] = [
    MenuAction::ByJuz,
    MenuAction::BySurah,
    MenuAction::ToggleLanguage,
    MenuAction::Quit,
];

impl MenuAction {
    pub fn key(self) -> &'static str {
        match self {
            MenuAction::ByJuz => "1",
            MenuAction::BySurah => "2",
            MenuAction::ToggleLanguage => "l",
            MenuAction::Quit => "q",
        }
    }

    // Labels resolve at render time so a locale switch shows immediately.
    fn label(self) -> String {
        match self {
            MenuAction::ByJuz => t!("by_juz").to_string(),
            MenuAction::BySurah => t!("by_surah").to_string(),
            MenuAction::ToggleLanguage => t!("lang_toggle").to_string(),
            MenuAction::Quit => t!("quit").to_string(),
        }
    }

    fn description(self) -> String {
        match self {
            MenuAction::ByJuz => t!("by_juz_desc").to_string(),
            MenuAction::BySurah => t!("by_surah_desc").to_string(),
            MenuAction::ToggleLanguage => t!("language_desc").to_string(),
            MenuAction::Quit => t!("quit_desc").to_string(),
        }
    }
}

pub struct Menu<'a> {
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { selected: 0, theme }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % ACTIONS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = ACTIONS.len() - 1;
        }
    }

    pub fn current(&self) -> MenuAction {
        ACTIONS[self.selected % ACTIONS.len()]
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(ACTIONS.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[2]);

        for (i, action) in ACTIONS.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = action.key(), label = action.label());
            let desc_text = format!("     {}", action.description());

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_muted()),
                )),
            ];

            let p = Paragraph::new(lines);
            if i < menu_layout.len() {
                p.render(menu_layout[i], buf);
            }
        }
    }
}
