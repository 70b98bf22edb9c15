use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::engine::selection::parse_verse_key;
use crate::quran::models::Verse;
use crate::session::practice::PracticeSession;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Starting verse, chapter badge and the stack of hidden/revealed cards.
pub struct PracticeView<'a> {
    session: &'a PracticeSession,
    rtl: bool,
    theme: &'a Theme,
}

impl<'a> PracticeView<'a> {
    pub fn new(session: &'a PracticeSession, theme: &'a Theme) -> Self {
        Self {
            session,
            rtl: false,
            theme,
        }
    }

    /// Right-align the translation and verse key lines too.
    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}

fn verse_lines<'l>(verse: &Verse, theme: &Theme, rtl: bool) -> Vec<(Line<'l>, Alignment)> {
    let colors = &theme.colors;
    let secondary = if rtl { Alignment::Right } else { Alignment::Center };
    let mut lines = vec![(
        Line::from(Span::styled(
            verse.text_uthmani.clone(),
            Style::default().fg(colors.verse_fg()).add_modifier(Modifier::BOLD),
        )),
        Alignment::Right,
    )];
    if !verse.translation.is_empty() {
        lines.push((
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", verse.translation),
                Style::default()
                    .fg(colors.translation_fg())
                    .add_modifier(Modifier::ITALIC),
            )),
            secondary,
        ));
    }
    lines.push((
        Line::from(Span::styled(
            verse.verse_key.clone(),
            Style::default().fg(colors.text_muted()),
        )),
        secondary,
    ));
    lines
}

/// Rows a revealed verse card needs at `width`, borders included.
fn verse_card_height(verse: &Verse, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2));
    let mut rows = wrapped_line_count(&verse.text_uthmani, inner) + 1;
    if !verse.translation.is_empty() {
        rows += wrapped_line_count(&verse.translation, inner.saturating_sub(2).max(1));
    }
    u16::try_from(rows + 2).unwrap_or(u16::MAX)
}

const HIDDEN_CARD_HEIGHT: u16 = 4;

/// First card to draw so that `focus` is still inside `available` rows.
fn first_visible(heights: &[u16], focus: usize, available: u16) -> usize {
    let focus = focus.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < focus {
        let used: u32 = heights[start..=focus].iter().map(|&h| u32::from(h)).sum();
        if used <= u32::from(available) {
            break;
        }
        start += 1;
    }
    start
}

fn render_lines(lines: Vec<(Line<'_>, Alignment)>, area: Rect, buf: &mut Buffer) {
    let mut y = area.y;
    let bottom = area.y + area.height;
    for (line, alignment) in lines {
        if y >= bottom {
            break;
        }
        let text = line.to_string();
        let rows = u16::try_from(wrapped_line_count(&text, usize::from(area.width)).max(1)).unwrap_or(1);
        let h = rows.min(bottom - y);
        Paragraph::new(line)
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .render(Rect::new(area.x, y, area.width, h), buf);
        y += h;
    }
}

impl Widget for PracticeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;
        if area.width < 4 || area.height == 0 {
            return;
        }
        let mut y = area.y;
        let bottom = area.y + area.height;

        if let Some(ref chapter) = session.chapter {
            let ayah = parse_verse_key(&session.start.verse_key)
                .map(|k| k.ayah.to_string())
                .unwrap_or_default();
            let badge = Line::from(vec![
                Span::styled(
                    chapter.name_arabic.clone(),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" | ", Style::default().fg(colors.text_muted())),
                Span::styled(chapter.name_simple.clone(), Style::default().fg(colors.fg())),
                Span::styled(" | ", Style::default().fg(colors.text_muted())),
                Span::styled(
                    format!("{} {ayah}", t!("ayah")),
                    Style::default().fg(colors.fg()),
                ),
            ]);
            Paragraph::new(badge)
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, 1), buf);
            y += 2;
        }

        if y >= bottom {
            return;
        }

        let start_h = verse_card_height(&session.start, area.width).min(bottom - y);
        let start_block = Block::bordered()
            .border_type(BorderType::Double)
            .title(format!(" {} ", t!("start_reciting")))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let start_area = Rect::new(area.x, y, area.width, start_h);
        let start_inner = start_block.inner(start_area);
        start_block.render(start_area, buf);
        render_lines(verse_lines(&session.start, self.theme, self.rtl), start_inner, buf);
        y += start_h;

        if session.hidden.is_empty() || y >= bottom {
            return;
        }

        let status = if session.revealed == 0 {
            Some(Span::styled(
                t!("recite_instruction", count = session.hidden.len()).to_string(),
                Style::default().fg(colors.text_muted()),
            ))
        } else if session.is_complete() {
            Some(Span::styled(
                t!("all_revealed").to_string(),
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            ))
        } else {
            None
        };
        if let Some(status) = status {
            Paragraph::new(Line::from(status))
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }

        let heights: Vec<u16> = session
            .hidden
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if session.is_revealed(i) {
                    verse_card_height(v, area.width)
                } else {
                    HIDDEN_CARD_HEIGHT
                }
            })
            .collect();
        let focus = session.revealed.min(session.hidden.len() - 1);
        let first = first_visible(&heights, focus, bottom.saturating_sub(y));

        let total = session.hidden.len();
        for (i, verse) in session.hidden.iter().enumerate().skip(first) {
            if y >= bottom {
                break;
            }
            let h = heights[i].min(bottom - y);
            let card_area = Rect::new(area.x, y, area.width, h);
            y += h;

            if session.is_revealed(i) {
                let block = Block::bordered()
                    .border_style(Style::default().fg(colors.revealed_border()))
                    .style(Style::default().bg(colors.bg()));
                let inner = block.inner(card_area);
                block.render(card_area, buf);
                render_lines(verse_lines(verse, self.theme, self.rtl), inner, buf);
                continue;
            }

            let is_next = session.is_next(i);
            let border = if is_next { colors.accent() } else { colors.hidden_border() };
            let block = Block::bordered()
                .border_type(if is_next { BorderType::Thick } else { BorderType::Plain })
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg()));
            let inner = block.inner(card_area);
            block.render(card_area, buf);

            let mut lines = vec![Line::from(Span::styled(
                t!("hidden_ayah", index = i + 1, total = total).to_string(),
                Style::default().fg(colors.text_muted()),
            ))];
            if is_next {
                lines.push(Line::from(Span::styled(
                    t!("tap_to_reveal").to_string(),
                    Style::default().fg(colors.accent()),
                )));
            }
            Paragraph::new(lines).alignment(Alignment::Center).render(inner, buf);
        }
    }
}
