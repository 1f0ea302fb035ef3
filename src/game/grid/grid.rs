use crate::game::types::Position;

/// Square occupancy map for one entity kind.
///
/// Each cell holds at most one id. The registry of that kind is authoritative;
/// the grid is kept in step with it by the world's lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<Id: Copy + PartialEq> {
    size: usize,
    cells: Vec<Vec<Option<Id>>>,
}

impl<Id: Copy + PartialEq> Grid<Id> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Id occupying `pos`, `None` if empty or outside the grid.
    pub fn occupant(&self, pos: Position) -> Option<Id> {
        self.cells.get(pos.x).and_then(|col| col.get(pos.y)).copied().flatten()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupant(pos).is_some()
    }

    /// Put `id` at `pos`, overwriting nothing: returns false if the cell is taken.
    pub fn place(&mut self, pos: Position, id: Id) -> bool {
        let Some(cell) = self.cells.get_mut(pos.x).and_then(|col| col.get_mut(pos.y)) else {
            return false;
        };
        if cell.is_some() {
            return false;
        }
        *cell = Some(id);
        true
    }

    /// Empty `pos` if it currently holds `id`.
    pub fn clear(&mut self, pos: Position, id: Id) {
        if let Some(cell) = self.cells.get_mut(pos.x).and_then(|col| col.get_mut(pos.y)) {
            if *cell == Some(id) {
                *cell = None;
            }
        }
    }

    pub fn reset(&mut self) {
        for col in self.cells.iter_mut() {
            col.fill(None);
        }
    }

    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}
