use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::quran::models::juz_name;
use crate::session::practice::{PracticeSession, PracticeSource};
use crate::ui::theme::Theme;

/// Sidebar with details of the chapter the starting verse belongs to.
pub struct ChapterPanel<'a> {
    session: &'a PracticeSession,
    theme: &'a Theme,
}

impl<'a> ChapterPanel<'a> {
    pub fn new(session: &'a PracticeSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

fn source_text(source: PracticeSource) -> String {
    match source {
        PracticeSource::Juz(n) => {
            format!("{} {n} {}", t!("juz_label"), juz_name(n).unwrap_or_default())
        }
        PracticeSource::Surah(n) => format!("{} {n}", t!("chapter_panel")),
    }
}

impl Widget for ChapterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("chapter_panel")))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let label = Style::default().fg(colors.text_muted());
        let value = Style::default().fg(colors.fg());
        let row = |name: String, text: String| {
            Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::styled(text, value),
            ])
        };

        let mut lines = Vec::new();
        if let Some(ref chapter) = self.session.chapter {
            lines.push(Line::from(Span::styled(
                chapter.name_arabic.clone(),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(chapter.name_simple.clone(), value)));
            lines.push(Line::from(""));
            lines.push(row(t!("revelation_place").to_string(), chapter.revelation_place.clone()));
            lines.push(row(t!("verses_count").to_string(), chapter.verses_count.to_string()));
        }
        lines.push(row(t!("source_label").to_string(), source_text(self.session.source)));
        lines.push(row(t!("ayah").to_string(), self.session.start.verse_key.clone()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
