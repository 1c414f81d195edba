use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::config::Palette;

/// Draws the score row above the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {score}")))
            .alignment(Alignment::Left)
            .style(
                Style::new()
                    .fg(palette.text)
                    .bg(palette.background)
                    .add_modifier(Modifier::BOLD),
            ),
        area,
    );
}
