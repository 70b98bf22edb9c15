use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct SelectorRow {
    pub number: String,
    pub primary: String,
    pub secondary: String,
}

/// Scrolling single-choice list for juz and surah selection.
pub struct Selector<'a> {
    title: String,
    rows: &'a [SelectorRow],
    selected: usize,
    rtl: bool,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(title: String, rows: &'a [SelectorRow], selected: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            rows,
            selected,
            rtl: false,
            theme,
        }
    }

    pub fn rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}

/// First visible row that keeps `selected` in view, roughly centered.
fn scroll_offset(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    selected.saturating_sub(height / 2).min(len - height)
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let height = usize::from(inner.height);
        let offset = scroll_offset(self.selected, self.rows.len(), height);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, row)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let primary_style = Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });
                let secondary_style = Style::default().fg(colors.text_muted());
                let number = format!("{:>4}. ", row.number);

                if self.rtl {
                    Line::from(vec![
                        Span::styled(format!("{}  ", row.secondary), secondary_style),
                        Span::styled(row.primary.clone(), primary_style),
                        Span::styled(number, secondary_style),
                        Span::styled(format!(" {indicator}"), primary_style),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled(format!("{indicator} "), primary_style),
                        Span::styled(number, secondary_style),
                        Span::styled(row.primary.clone(), primary_style),
                        Span::styled(format!("  {}", row.secondary), secondary_style),
                    ])
                }
            })
            .collect();

        let alignment = if self.rtl { Alignment::Right } else { Alignment::Left };
        Paragraph::new(lines).alignment(alignment).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_short_list_never_scrolls() {
        assert_eq!(scroll_offset(5, 10, 20), 0);
        assert_eq!(scroll_offset(0, 0, 0), 0);
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        for selected in 0..114 {
            let offset = scroll_offset(selected, 114, 10);
            assert!(selected >= offset && selected < offset + 10, "selected={selected} offset={offset}");
        }
        assert_eq!(scroll_offset(113, 114, 10), 104);
    }
}
