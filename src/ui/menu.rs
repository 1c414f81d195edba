use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::Palette;
use crate::snake::Collision;

const GAME_OVER_TITLE: &str = "GAME OVER";
const RESTART_PROMPT: &str = "Press R to restart";

/// Draws the game-over popup centered in `area`.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    collision: Option<Collision>,
    palette: &Palette,
) {
    let score_line = format!("Score: {score}");
    let cause_line = match collision {
        Some(Collision::Wall) => "Cause: hit wall",
        Some(Collision::SelfBite) => "Cause: hit yourself",
        None => "",
    };

    let texts = [
        GAME_OVER_TITLE,
        "",
        score_line.as_str(),
        cause_line,
        "",
        RESTART_PROMPT,
    ];
    let popup = centered_popup(area, &texts);
    frame.render_widget(Clear, popup);

    let style = Style::new().fg(palette.text).bg(palette.background);
    let lines: Vec<Line<'_>> = texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            if index == 0 {
                Line::styled(*text, style.add_modifier(Modifier::BOLD))
            } else {
                Line::from(*text)
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_style(style)),
        popup,
    );
}

/// Sizes a bordered popup to fit `lines` with one column of padding each side.
fn centered_popup(area: Rect, lines: &[&str]) -> Rect {
    let text_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = u16::try_from(text_width)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    center
}
