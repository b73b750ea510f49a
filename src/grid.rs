use eframe::egui::{pos2, vec2, Pos2, Vec2};

/// Uniform cell grid covering a pixel surface. Cells are addressed by
/// (row, col); signed indices are accepted everywhere so walkers can probe
/// past the edges without special-casing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub pitch: f32,
    pub edge_padding: f32,
}

impl Grid {
    /// Covers at least `width` x `height` pixels. Zero or negative sizes
    /// degenerate to a 1x1 grid.
    pub fn new(width: f32, height: f32, pitch: f32, edge_padding: f32) -> Self {
        let rows = ((height / pitch).ceil().max(1.0)) as usize;
        let cols = ((width / pitch).ceil().max(1.0)) as usize;
        Self {
            rows,
            cols,
            pitch,
            edge_padding,
        }
    }

    pub fn with_dims(rows: usize, cols: usize, pitch: f32, edge_padding: f32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            pitch,
            edge_padding,
        }
    }

    pub fn surface_size(&self) -> Vec2 {
        vec2(
            self.cols as f32 * self.pitch + 2.0 * self.edge_padding,
            self.rows as f32 * self.pitch + 2.0 * self.edge_padding,
        )
    }

    pub fn cell_center(&self, row: i32, col: i32) -> Pos2 {
        pos2(
            self.edge_padding + col as f32 * self.pitch + self.pitch / 2.0,
            self.edge_padding + row as f32 * self.pitch + self.pitch / 2.0,
        )
    }

    /// Row whose cell band contains the document-space `y`, unclamped.
    pub fn row_at(&self, y: f32) -> i32 {
        ((y - self.edge_padding) / self.pitch).floor() as i32
    }

    pub fn clamp_row(&self, row: i32) -> i32 {
        row.clamp(0, self.rows as i32 - 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Free,
    /// Claimed by an exclusion rectangle or the stencil box; nothing may be
    /// drawn here and nothing was.
    Reserved,
    /// A walker drew a wire or component through this cell.
    Drawn,
}

/// Per-layout-pass claim table. Built fresh each generation and discarded
/// afterwards; its effect persists only through the particles and traces it
/// shaped.
#[derive(Clone, Debug)]
pub struct OccupancyMask {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl OccupancyMask {
    pub fn new(grid: &Grid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            cells: vec![Cell::Free; grid.rows * grid.cols],
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            None
        } else {
            Some(row as usize * self.cols + col as usize)
        }
    }

    /// Out-of-bounds cells count as occupied, which is what keeps walkers on
    /// the grid.
    pub fn is_clear(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(i) => self.cells[i] == Cell::Free,
            None => false,
        }
    }

    pub fn is_drawn(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(i) => self.cells[i] == Cell::Drawn,
            None => false,
        }
    }

    pub fn is_reserved(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(i) => self.cells[i] == Cell::Reserved,
            None => false,
        }
    }

    /// Out-of-bounds marks are silently dropped.
    pub fn reserve(&mut self, row: i32, col: i32) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Cell::Reserved;
        }
    }

    pub fn draw(&mut self, row: i32, col: i32) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Cell::Drawn;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_size_degenerates_to_single_cell() {
        let grid = Grid::new(0.0, 0.0, 30.0, 0.0);
        assert_eq!((grid.rows, grid.cols), (1, 1));
    }

    #[test]
    fn cell_center_offsets_by_padding_and_half_pitch() {
        let grid = Grid::with_dims(11, 13, 30.0, 40.0);
        assert_eq!(grid.cell_center(0, 0), pos2(55.0, 55.0));
        assert_eq!(grid.cell_center(2, 1), pos2(85.0, 115.0));
    }

    #[test]
    fn row_at_inverts_cell_center() {
        let grid = Grid::new(900.0, 1200.0, 30.0, 0.0);
        for row in [0, 7, 39] {
            let center = grid.cell_center(row, 0);
            assert_eq!(grid.row_at(center.y), row);
        }
    }

    #[test]
    fn mask_treats_out_of_bounds_as_occupied() {
        let grid = Grid::with_dims(4, 4, 30.0, 0.0);
        let mut mask = OccupancyMask::new(&grid);
        assert!(!mask.is_clear(-1, 0));
        assert!(!mask.is_clear(0, 4));
        // Dropped without panicking.
        mask.draw(-3, 100);
        assert!(mask.is_clear(0, 0));
    }

    #[test]
    fn reserved_and_drawn_are_distinct() {
        let grid = Grid::with_dims(2, 2, 30.0, 0.0);
        let mut mask = OccupancyMask::new(&grid);
        mask.reserve(0, 0);
        mask.draw(1, 1);
        assert!(mask.is_reserved(0, 0) && !mask.is_drawn(0, 0));
        assert!(mask.is_drawn(1, 1) && !mask.is_reserved(1, 1));
        assert!(!mask.is_clear(0, 0) && !mask.is_clear(1, 1));
    }

    proptest! {
        #[test]
        fn surface_size_is_exact(
            width in 0.0_f32..4000.0,
            height in 0.0_f32..8000.0,
            padding in 0.0_f32..60.0,
        ) {
            let grid = Grid::new(width, height, 30.0, padding);
            let size = grid.surface_size();
            prop_assert_eq!(size.x, grid.cols as f32 * 30.0 + 2.0 * padding);
            prop_assert_eq!(size.y, grid.rows as f32 * 30.0 + 2.0 * padding);
            // The surface always covers the requested area (up to float
            // rounding in the division).
            prop_assert!(size.x >= width - 1.0e-3);
            prop_assert!(size.y >= height - 1.0e-3);
        }
    }
}
