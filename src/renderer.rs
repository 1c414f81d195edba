use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::config::{GLYPH_CELL, GameConfig, Palette, TERMINAL_COLUMNS_PER_CELL, to_i32};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, palette: &Palette) {
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(palette.background)),
        area,
    );

    let config = state.config();
    let (hud_area, board_area) = board_layout(area, config);
    render_hud(frame, hud_area, state.score, palette);

    let block = Block::bordered()
        .border_style(Style::new().fg(palette.border).bg(palette.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let food_style = Style::new().fg(palette.food).bg(palette.background);
    draw_cell(frame, inner, config, state.food_position(), food_style);

    let snake_style = Style::new().fg(palette.snake).bg(palette.background);
    for segment in state.snake.segments() {
        draw_cell(frame, inner, config, *segment, snake_style);
    }

    if state.is_over() {
        render_game_over_menu(frame, area, state.score, state.collision, palette);
    }
}

/// Centers the bordered board, plus one HUD row above it, inside `area`.
fn board_layout(area: Rect, config: &GameConfig) -> (Rect, Rect) {
    let width = u16::try_from(config.columns())
        .unwrap_or(u16::MAX)
        .saturating_mul(TERMINAL_COLUMNS_PER_CELL)
        .saturating_add(2);
    let height = u16::try_from(config.rows())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [hud, board] = Layout::vertical([Constraint::Length(1), Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    (hud, board)
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    config: &GameConfig,
    position: Position,
    style: Style,
) {
    let Some((x, y)) = board_to_terminal(inner, config, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, GLYPH_CELL, style);
}

/// Maps a board position to the terminal cell of its left half.
///
/// Returns `None` for off-board positions (a head that just hit a wall) and
/// for cells clipped by a terminal too small to show the whole board.
fn board_to_terminal(inner: Rect, config: &GameConfig, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(config.board()) {
        return None;
    }

    let cell = to_i32(config.cell_size());
    let column = u16::try_from(position.x / cell).ok()?;
    let row = u16::try_from(position.y / cell).ok()?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(TERMINAL_COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{BoardSize, CLASSIC_PALETTE, GameConfig};
    use crate::food::Food;
    use crate::game::GameState;
    use crate::snake::{Position, Snake};

    use super::{board_to_terminal, render};

    fn small_config() -> GameConfig {
        GameConfig::new(
            BoardSize {
                width: 100,
                height: 60,
            },
            20,
            10,
        )
        .expect("valid config")
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn board_positions_map_to_two_column_cells() {
        let config = small_config();
        let inner = Rect::new(1, 2, 10, 3);

        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 0, y: 0 }),
            Some((1, 2))
        );
        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 80, y: 40 }),
            Some((9, 4))
        );
        assert_eq!(
            board_to_terminal(inner, &config, Position { x: -20, y: 0 }),
            None
        );
        assert_eq!(
            board_to_terminal(inner, &config, Position { x: 100, y: 0 }),
            None
        );
    }

    #[test]
    fn frame_shows_score_snake_and_food() {
        let mut state = GameState::new_with_seed(small_config(), 1);
        state.snake = Snake::new(Position { x: 40, y: 20 }, 20);
        state.food = Food::at(Position { x: 0, y: 0 });
        state.score = 4;

        let mut terminal = Terminal::new(TestBackend::new(30, 10)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &state, &CLASSIC_PALETTE))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("Score: 4"));
        assert_eq!(text.matches('█').count(), 4);
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn game_over_frame_shows_restart_prompt() {
        let mut state = GameState::new_with_seed(small_config(), 2);
        state.snake = Snake::new(Position { x: 80, y: 20 }, 20);
        state.food = Food::at(Position { x: 0, y: 0 });
        state.update();
        assert!(state.is_over());

        let mut terminal = Terminal::new(TestBackend::new(40, 14)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &state, &CLASSIC_PALETTE))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press R to restart"));
    }
}
