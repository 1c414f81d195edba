use rand::Rng;

use crate::config::{GameConfig, to_i32};
use crate::snake::Position;

/// Food currently on the board.
///
/// Placement is a single uniform draw over every cell of the board. It does
/// not avoid the snake, so food can appear under a body segment; the head
/// still eats it once it gets there.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Creates food at a fresh random cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        Self::at(random_cell(rng, config))
    }

    /// Moves the food to a fresh random cell.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        self.position = random_cell(rng, config);
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Draws a uniformly random cell-aligned position on the board.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Position {
    let cell = to_i32(config.cell_size());
    let grid_x = rng.gen_range(0..config.columns());
    let grid_y = rng.gen_range(0..config.rows());

    Position {
        x: to_i32(grid_x) * cell,
        y: to_i32(grid_y) * cell,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{BoardSize, GameConfig};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Food, random_cell};

    #[test]
    fn regenerated_food_stays_on_board_and_aligned() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::spawn(&mut rng, &config);

        for _ in 0..1_000 {
            food.regenerate(&mut rng, &config);
            let Position { x, y } = food.position();

            assert!((0..=780).contains(&x), "x out of range: {x}");
            assert!((0..=580).contains(&y), "y out of range: {y}");
            assert_eq!(x % 20, 0);
            assert_eq!(y % 20, 0);
        }
    }

    #[test]
    fn every_cell_of_a_small_board_is_reachable() {
        let config = GameConfig::new(
            BoardSize {
                width: 60,
                height: 40,
            },
            20,
            10,
        )
        .expect("valid config");
        let mut rng = StdRng::seed_from_u64(11);

        let seen: HashSet<Position> = (0..500).map(|_| random_cell(&mut rng, &config)).collect();

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn single_cell_board_always_places_at_origin() {
        let config = GameConfig::new(
            BoardSize {
                width: 20,
                height: 20,
            },
            20,
            10,
        )
        .expect("valid config");
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            assert_eq!(random_cell(&mut rng, &config), Position { x: 0, y: 0 });
        }
    }

    #[test]
    fn widest_board_places_food_without_overflow() {
        let config = GameConfig::new(
            BoardSize {
                width: 2_147_483_640,
                height: 2_147_483_640,
            },
            5,
            10,
        )
        .expect("board at the limit");
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..1_000 {
            let Position { x, y } = random_cell(&mut rng, &config);
            assert!((0..2_147_483_640).contains(&x) && x % 5 == 0);
            assert!((0..2_147_483_640).contains(&y) && y % 5 == 0);
        }
    }

    #[test]
    fn food_may_land_on_the_snake_body() {
        // Two-cell board fully covered by the snake: placement does not
        // reject occupied cells, so the food must land on the body.
        let config = GameConfig::new(
            BoardSize {
                width: 40,
                height: 20,
            },
            20,
            10,
        )
        .expect("valid config");
        let snake = Snake::from_segments(
            vec![Position { x: 0, y: 0 }, Position { x: 20, y: 0 }],
            Direction::Left,
            20,
        );
        let mut rng = StdRng::seed_from_u64(5);

        let food = Food::spawn(&mut rng, &config);

        assert!(snake.occupies(food.position()));
    }
}
