use std::collections::VecDeque;

use crate::config::{BoardSize, to_i32};
use crate::input::{Direction, direction_change_is_valid};

/// Board position in pixel coordinates, always a multiple of the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn is_within_bounds(self, board: BoardSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < to_i32(board.width)
            && self.y < to_i32(board.height)
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, cell_size: i32) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - cell_size,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + cell_size,
            },
            Direction::Left => Self {
                x: self.x - cell_size,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + cell_size,
                y: self.y,
            },
        }
    }
}

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// Snake body, heading, and one-shot growth flag.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    cell_size: i32,
    growth_pending: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading right.
    #[must_use]
    pub fn new(start: Position, cell_size: u32) -> Self {
        Self::from_segments(vec![start], Direction::Right, cell_size)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, cell_size: u32) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            cell_size: to_i32(cell_size),
            growth_pending: false,
        }
    }

    /// Advances one cell in the current direction.
    ///
    /// The new head is pushed before the tail is trimmed, so a pending growth
    /// keeps the old tail and the length increases by one.
    pub fn move_forward(&mut self) {
        let next_head = self.head_position().step(self.direction, self.cell_size);
        self.body.push_front(next_head);

        if self.growth_pending {
            self.growth_pending = false;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Queues growth on the next move. Repeated calls before that move still
    /// add a single segment.
    pub fn grow(&mut self) {
        self.growth_pending = true;
    }

    /// Turns toward `requested` unless that would reverse onto the body.
    pub fn change_direction(&mut self, requested: Direction) {
        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }
    }

    /// Classifies a collision of the current head, if any.
    #[must_use]
    pub fn collision(&self, board: BoardSize) -> Option<Collision> {
        let head = self.head_position();
        if !head.is_within_bounds(board) {
            return Some(Collision::Wall);
        }

        if self.body.iter().skip(1).any(|segment| *segment == head) {
            return Some(Collision::SelfBite);
        }

        None
    }

    /// Returns true when the head is off the board or on another segment.
    #[must_use]
    pub fn check_collision(&self, board: BoardSize) -> bool {
        self.collision(board).is_some()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head_position(&self) -> Position {
        // The body is never empty: construction requires a segment and
        // `move_forward` pushes before it pops.
        self.body[0]
    }

    /// Returns a snapshot of the body from head to tail.
    #[must_use]
    pub fn body_segments(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    /// Iterates over body segments from head to tail without copying.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }
}
