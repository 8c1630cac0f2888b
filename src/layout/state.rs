//! Drawing cursor and the push/pop state stack

use crate::errors::PlacementError;
use crate::types::{Angle, Offset, Point};

/// Where the next element goes when nothing else says otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub position: Point,
    pub direction: Angle,
}

impl Cursor {
    pub fn new(position: Point, direction: Angle) -> Self {
        Cursor { position, direction }
    }
}

/// Current cursor plus a LIFO stack of saved cursors
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    current: Cursor,
    stack: Vec<Cursor>,
}

impl DrawingState {
    pub fn new(start: Cursor) -> Self {
        DrawingState { current: start, stack: Vec::new() }
    }

    pub fn cursor(&self) -> Cursor {
        self.current
    }

    pub fn here(&self) -> Point {
        self.current.position
    }

    pub fn direction(&self) -> Angle {
        self.current.direction
    }

    /// Number of saved cursors
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self) {
        self.stack.push(self.current);
    }

    /// Restore the most recently pushed cursor
    pub fn pop(&mut self) -> Result<Cursor, PlacementError> {
        let saved = self.stack.pop().ok_or(PlacementError::EmptyStack)?;
        self.current = saved;
        Ok(saved)
    }

    /// Record a placement: move to `position` facing `direction`
    pub(crate) fn place(&mut self, position: Point, direction: Angle) {
        self.current = Cursor::new(position, direction);
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.current.position = position;
    }

    pub(crate) fn set_direction(&mut self, direction: Angle) {
        self.current.direction = direction;
    }

    pub(crate) fn move_by(&mut self, offset: Offset) {
        self.current.position = self.current.position + offset;
    }
}
