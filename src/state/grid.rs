use crate::infra::Point;

use super::error::StateError;

pub const SHELTER_INITIAL_ENERGY: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    /// Walkable, no effect in the current rules.
    Portal,
    Shelter { energy: i32 },
}

impl Cell {
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Cell::Wall,
            'w' => Cell::Portal,
            'U' => Cell::Shelter {
                energy: SHELTER_INITIAL_ENERGY,
            },
            _ => Cell::Open,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
            Cell::Portal => 'w',
            Cell::Shelter { .. } => 'U',
        }
    }
}

/// Static map. Dimensions and walls never change after construction; shelter
/// energy stored here is the initial value, live energy lives in the world state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn from_ascii(rows: &[&str]) -> Result<Self, StateError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(StateError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(StateError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            cells.extend(line.chars().map(Cell::from_symbol));
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// Out-of-bounds coordinates clamp to the nearest row/column.
    pub fn cell(&self, pos: Point) -> Cell {
        let x = pos.x.clamp(0, self.width - 1);
        let y = pos.y.clamp(0, self.height - 1);
        self.cells[(y * self.width + x) as usize]
    }

    pub fn in_bounds(&self, pos: &Point) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn is_wall(&self, pos: Point) -> bool {
        self.cell(pos).is_wall()
    }

    pub fn is_walkable(&self, pos: &Point) -> bool {
        self.in_bounds(pos) && !self.cell(*pos).is_wall()
    }

    pub fn shelter_positions(&self) -> Vec<(Point, i32)> {
        self.iter()
            .filter_map(|(pos, cell)| match cell {
                Cell::Shelter { energy } => Some((pos, energy)),
                _ => None,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as i32;
            (Point::new(index % self.width, index / self.width), *cell)
        })
    }

    pub fn row_symbols(&self, y: i32) -> Vec<char> {
        (0..self.width)
            .map(|x| self.cell(Point::new(x, y)).symbol())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_cell_kinds() {
        let grid = Grid::from_ascii(&["#.wU", "...."]).unwrap();
        assert_eq!(grid.width, 4);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.cell(Point::new(0, 0)), Cell::Wall);
        assert_eq!(grid.cell(Point::new(1, 0)), Cell::Open);
        assert_eq!(grid.cell(Point::new(2, 0)), Cell::Portal);
        assert_eq!(grid.cell(Point::new(3, 0)), Cell::Shelter { energy: 10 });
        assert_eq!(grid.shelter_positions(), vec![(Point::new(3, 0), 10)]);
    }

    #[test]
    fn test_out_of_bounds_clamps() {
        let grid = Grid::from_ascii(&["#..", "..U"]).unwrap();
        assert_eq!(grid.cell(Point::new(-5, -5)), Cell::Wall);
        assert_eq!(grid.cell(Point::new(10, 10)), Cell::Shelter { energy: 10 });
        assert!(!grid.is_walkable(&Point::new(3, 1)));
        assert!(grid.is_walkable(&Point::new(2, 1)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert_eq!(
            Grid::from_ascii(&["...", ".."]),
            Err(StateError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(Grid::from_ascii(&[]), Err(StateError::EmptyGrid));
    }
}
