use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Reveal progress as a filled bar with a `done/total` label.
pub struct ProgressBar<'a> {
    label: String,
    done: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            done: done.min(total),
            total,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.done as f64 / self.total as f64
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * f64::from(inner.width)) as u16;
        let label = format!("{}/{}", self.done, self.total);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_clamps_and_handles_empty() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new("x", 2, 4, &theme).ratio(), 0.5);
        assert_eq!(ProgressBar::new("x", 9, 4, &theme).ratio(), 1.0);
        assert_eq!(ProgressBar::new("x", 0, 0, &theme).ratio(), 1.0);
    }

    #[test]
    fn test_render_fills_proportionally() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("x", 1, 2, &theme).render(area, &mut buf);
        let filled = theme.colors.bar_filled();
        assert_eq!(buf[(1, 1)].bg, filled);
        assert_eq!(buf[(5, 1)].bg, filled);
        assert_ne!(buf[(6, 1)].bg, filled);
    }
}
