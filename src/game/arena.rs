use std::collections::HashSet;

use super::error::GameError;
use super::state::Position;

/// Smallest map dimension that leaves room to move between the walls
pub const MIN_MAP_SIZE: i32 = 4;

/// Arena dimensions in blocks. `width`/`height` are the far wall coordinates,
/// so the playable interior is `1..width` by `1..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaSize {
    pub width: i32,
    pub height: i32,
}

impl ArenaSize {
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width < MIN_MAP_SIZE || height < MIN_MAP_SIZE {
            return Err(GameError::ArenaTooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    /// Derive the arena from a drawing area in pixels
    pub fn from_canvas(width_px: u32, height_px: u32, block_size: u32) -> Result<Self, GameError> {
        if block_size == 0 {
            return Err(GameError::InvalidConfig("block size must be positive".into()));
        }
        let blocks_x = (width_px / block_size) as i32;
        let blocks_y = (height_px / block_size) as i32;
        Self::new(blocks_x - 1, blocks_y - 1)
    }

    /// Number of interior cells food can land on
    pub fn interior_cells(&self) -> usize {
        ((self.width - 1) * (self.height - 1)).max(0) as usize
    }
}

/// The fixed border of the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    cells: HashSet<Position>,
}

impl Wall {
    /// Enumerate the perimeter of `0..=map_width` by `0..=map_height`
    pub fn build(map_width: i32, map_height: i32) -> Self {
        let mut cells = HashSet::new();

        for x in 0..=map_width {
            cells.insert(Position::new(x, 0));
            cells.insert(Position::new(x, map_height));
        }
        for y in 0..=map_height {
            cells.insert(Position::new(0, y));
            cells.insert(Position::new(map_width, y));
        }

        Self { cells }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
